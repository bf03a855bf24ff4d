//! Property-based tests for the to-do list reducer.
//!
//! The reducer is pure, so arbitrary operation sequences can be driven
//! through it directly and the list invariants checked after every step.

#![allow(clippy::unwrap_used)] // Test code can unwrap

use proptest::prelude::*;
use todolist::{TodoAction, TodoEnvironment, TodoId, TodoListState, TodoReducer};
use todolist_core::reducer::Reducer;

/// One externally observable operation, as a generatable value
#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Toggle(u64),
    Remove(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        // Mix of real text and blank-ish input
        "[ a-z]{0,12}".prop_map(Op::Add),
        (0u64..20).prop_map(Op::Toggle),
        (0u64..20).prop_map(Op::Remove),
    ]
}

fn apply(state: &mut TodoListState, op: Op) {
    let action = match op {
        Op::Add(text) => TodoAction::Add { text },
        Op::Toggle(id) => TodoAction::Toggle {
            id: TodoId::new(id),
        },
        Op::Remove(id) => TodoAction::Remove {
            id: TodoId::new(id),
        },
    };
    TodoReducer::new().reduce(state, action, &TodoEnvironment);
}

proptest! {
    #[test]
    fn ids_stay_pairwise_distinct(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut state = TodoListState::new();

        for op in ops {
            apply(&mut state, op);

            let mut ids: Vec<_> = state.items().iter().map(|t| t.id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), state.len());
        }
    }

    #[test]
    fn stored_text_is_never_blank(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut state = TodoListState::new();

        for op in ops {
            apply(&mut state, op);

            for todo in state.items() {
                prop_assert!(!todo.text.trim().is_empty());
            }
        }
    }

    #[test]
    fn surviving_items_keep_their_relative_order(
        texts in prop::collection::vec("[a-z]{1,8}", 1..16),
        removed in prop::collection::vec(0u64..16, 0..8),
    ) {
        let mut state = TodoListState::new();
        for text in &texts {
            apply(&mut state, Op::Add(text.clone()));
        }

        for id in removed {
            apply(&mut state, Op::Remove(id));
        }

        // Ids were issued in insertion order, so order preservation
        // means the surviving ids are still ascending
        let ids: Vec<_> = state.items().iter().map(|t| t.id.value()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        prop_assert_eq!(ids, sorted);
    }

    #[test]
    fn toggle_twice_is_identity(
        texts in prop::collection::vec("[a-z]{1,8}", 1..8),
        id in 0u64..8,
    ) {
        let mut state = TodoListState::new();
        for text in &texts {
            apply(&mut state, Op::Add(text.clone()));
        }

        let before = state.clone();
        apply(&mut state, Op::Toggle(id));
        apply(&mut state, Op::Toggle(id));
        prop_assert_eq!(state, before);
    }
}
