//! Interactive CLI for the to-do list store.
//!
//! This binary is the presentation layer: it collects user input, calls
//! store operations, and re-renders the list from snapshots. All list
//! logic lives in the store; the loop below only parses commands and
//! prints.

use std::io::Write as _;
use std::time::Duration;

use todolist::{Todo, TodoId, TodoListStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn render(items: &[Todo]) {
    if items.is_empty() {
        println!("  (nothing to do)");
        return;
    }
    for todo in items {
        let mark = if todo.completed { "x" } else { " " };
        println!("  [{}] {:>3}  {}", mark, todo.id, todo.text);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  add <text>    append an item");
    println!("  toggle <id>   flip an item's completed mark");
    println!("  rm <id>       delete an item");
    println!("  list          print the list");
    println!("  quit          exit");
}

fn parse_id(arg: &str) -> Option<TodoId> {
    arg.trim().parse::<u64>().ok().map(TodoId::new)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todolist=info,todolist_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== To-Do List ===");
    print_help();

    let store = TodoListStore::new();
    let mut changes = store.subscribe();
    changes.borrow_and_update();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };

        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => {},
            "add" => store.add(rest).await?,
            "toggle" => match parse_id(rest) {
                Some(id) => store.toggle(id).await?,
                None => println!("usage: toggle <id>"),
            },
            "rm" => match parse_id(rest) {
                Some(id) => store.remove(id).await?,
                None => println!("usage: rm <id>"),
            },
            "list" => render(&store.snapshot().await),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (try 'help')"),
        }

        // Redraw only when the store says something changed
        if changes.has_changed()? {
            let snapshot = changes.borrow_and_update().items().to_vec();
            render(&snapshot);
        }
    }

    store.shutdown(Duration::from_secs(1)).await?;
    println!("bye");
    Ok(())
}
