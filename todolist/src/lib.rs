//! In-memory to-do list store.
//!
//! This crate implements the state manager for a single-screen to-do
//! list: add a text item, toggle its completed state, delete it, and
//! observe the list for redraws. It demonstrates:
//!
//! - A pure reducer over an ordered list with a monotonic id counter
//! - The defensive no-op policy (blank text and unknown ids change nothing)
//! - Functional updates (toggle replaces the item value)
//! - A snapshot subscription that fires once per successful mutation
//!
//! # Quick Start
//!
//! ```no_run
//! use todolist::TodoListStore;
//!
//! # async fn example() -> Result<(), todolist_runtime::StoreError> {
//! let store = TodoListStore::new();
//!
//! store.add("buy milk").await?;
//! store.add("wash car").await?;
//!
//! let items = store.snapshot().await;
//! store.toggle(items[0].id).await?;
//!
//! let done = store.with_state(|s| s.completed_count()).await;
//! assert_eq!(done, 1);
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::TodoListStore;
pub use types::{Todo, TodoAction, TodoId, TodoListState};
