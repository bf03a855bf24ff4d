//! Reducer logic for the to-do list.
//!
//! The reducer is the single place the list is mutated. All three
//! operations follow the defensive no-op policy: blank text and unknown
//! ids change nothing and raise nothing.

use crate::types::{Todo, TodoAction, TodoListState};
use todolist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Environment dependencies for the to-do reducer
///
/// The to-do list is a pure state machine; it needs no clock, no I/O,
/// and no id source beyond the counter carried in the state itself.
/// The type exists as the dependency seam the runtime expects.
#[derive(Clone, Debug, Default)]
pub struct TodoEnvironment;

/// Reducer for the to-do list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoListState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::Add { text } => {
                let text = text.trim();
                if text.is_empty() {
                    // Silent rejection: blank input creates nothing
                    tracing::debug!("Ignoring add with blank text");
                    return smallvec![Effect::None];
                }

                // The counter, not the list length, issues ids; deletions
                // therefore never lead to a reissued id.
                let id = state.next_id;
                state.next_id = id.next();
                state.items.push(Todo::new(id, text.to_string()));
            },

            TodoAction::Toggle { id } => {
                if let Some(slot) = state.items.iter_mut().find(|todo| todo.id == id) {
                    // Functional update: replace the value rather than
                    // flipping the flag in place
                    *slot = slot.with_completed(!slot.completed);
                } else {
                    tracing::debug!(%id, "Ignoring toggle for unknown id");
                }
            },

            TodoAction::Remove { id } => {
                // retain preserves the relative order of the survivors;
                // an unknown id removes nothing
                state.items.retain(|todo| todo.id != id);
            },
        }

        // Pure state machine - no side effects
        smallvec![Effect::None]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;
    use todolist_testing::{assertions, ReducerTest};

    fn state_with(texts: &[&str]) -> TodoListState {
        let mut state = TodoListState::new();
        let reducer = TodoReducer::new();
        for text in texts {
            reducer.reduce(
                &mut state,
                TodoAction::Add {
                    text: (*text).to_string(),
                },
                &TodoEnvironment,
            );
        }
        state
    }

    #[test]
    fn add_appends_to_the_end() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment)
            .given_state(state_with(&["wash car"]))
            .when_action(TodoAction::Add {
                text: "buy milk".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 2);
                let last = state.items().last().unwrap();
                assert_eq!(last.text, "buy milk");
                assert!(!last.completed);
                assert_eq!(last.id, TodoId::new(1));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn add_trims_surrounding_whitespace() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment)
            .given_state(TodoListState::new())
            .when_action(TodoAction::Add {
                text: "  pay bills  ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.items()[0].text, "pay bills");
            })
            .run();
    }

    #[test]
    fn add_blank_text_is_a_noop() {
        for blank in ["", "   ", "\t\n"] {
            ReducerTest::new(TodoReducer::new())
                .with_env(TodoEnvironment)
                .given_state(state_with(&["wash car"]))
                .when_action(TodoAction::Add {
                    text: blank.to_string(),
                })
                .then_state(|state| {
                    assert_eq!(state.len(), 1);
                })
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn add_after_remove_issues_a_fresh_id() {
        let mut state = state_with(&["wash car", "pay bills"]);
        let reducer = TodoReducer::new();

        // Delete id 0, then add: the new item must NOT get id 1, which
        // the surviving item already holds
        reducer.reduce(
            &mut state,
            TodoAction::Remove { id: TodoId::new(0) },
            &TodoEnvironment,
        );
        reducer.reduce(
            &mut state,
            TodoAction::Add {
                text: "walk dog".to_string(),
            },
            &TodoEnvironment,
        );

        assert_eq!(state.len(), 2);
        assert_eq!(state.items()[0].id, TodoId::new(1));
        assert_eq!(state.items()[1].id, TodoId::new(2));
    }

    #[test]
    fn toggle_flips_only_the_matching_item() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment)
            .given_state(state_with(&["wash car", "pay bills"]))
            .when_action(TodoAction::Toggle { id: TodoId::new(0) })
            .then_state(|state| {
                assert!(state.items()[0].completed);
                assert!(!state.items()[1].completed);
                assert_eq!(state.items()[0].text, "wash car");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn toggle_twice_restores_the_original() {
        let mut state = state_with(&["wash car"]);
        let reducer = TodoReducer::new();
        let before = state.clone();

        reducer.reduce(
            &mut state,
            TodoAction::Toggle { id: TodoId::new(0) },
            &TodoEnvironment,
        );
        reducer.reduce(
            &mut state,
            TodoAction::Toggle { id: TodoId::new(0) },
            &TodoEnvironment,
        );

        assert_eq!(state, before);
    }

    #[test]
    fn toggle_unknown_id_is_a_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment)
            .given_state(state_with(&["wash car"]))
            .when_action(TodoAction::Toggle {
                id: TodoId::new(99),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert!(!state.items()[0].completed);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment)
            .given_state(state_with(&["a", "b", "c"]))
            .when_action(TodoAction::Remove { id: TodoId::new(1) })
            .then_state(|state| {
                let texts: Vec<_> = state.items().iter().map(|t| t.text.as_str()).collect();
                assert_eq!(texts, ["a", "c"]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let mut state = state_with(&["wash car"]);
        let reducer = TodoReducer::new();
        let before = state.clone();

        reducer.reduce(
            &mut state,
            TodoAction::Remove { id: TodoId::new(7) },
            &TodoEnvironment,
        );

        assert_eq!(state, before);
    }

    #[test]
    fn operations_after_remove_target_nothing() {
        let mut state = state_with(&["wash car"]);
        let reducer = TodoReducer::new();

        reducer.reduce(
            &mut state,
            TodoAction::Remove { id: TodoId::new(0) },
            &TodoEnvironment,
        );
        let after_remove = state.clone();

        // Toggling or removing the dead id changes nothing
        reducer.reduce(
            &mut state,
            TodoAction::Toggle { id: TodoId::new(0) },
            &TodoEnvironment,
        );
        assert_eq!(state, after_remove);

        reducer.reduce(
            &mut state,
            TodoAction::Remove { id: TodoId::new(0) },
            &TodoEnvironment,
        );
        assert_eq!(state, after_remove);
    }
}
