//! # Todolist Testing
//!
//! Testing utilities and helpers for the todolist architecture.
//!
//! This crate provides:
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effect lists
//!
//! ## Example
//!
//! ```ignore
//! use todolist_testing::{assertions, ReducerTest};
//!
//! #[test]
//! fn add_appends_an_item() {
//!     ReducerTest::new(TodoReducer::new())
//!         .with_env(TodoEnvironment::default())
//!         .given_state(TodoListState::new())
//!         .when_action(TodoAction::Add { text: "buy milk".into() })
//!         .then_state(|state| assert_eq!(state.len(), 1))
//!         .then_effects(assertions::assert_no_effects)
//!         .run();
//! }
//! ```


pub use reducer_test::{assertions, ReducerTest};
