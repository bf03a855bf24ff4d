//! Domain types for the to-do list.
//!
//! A to-do list is an ordered sequence of items plus the counter that
//! issues their identifiers. Insertion order is display order and never
//! otherwise changes.

use serde::{Deserialize, Serialize};

/// Unique identifier for a to-do item
///
/// Issued by the store from a strictly monotonic counter, so an id is
/// never reused within a session, even after the item is deleted.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The identifier issued after this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item
///
/// `id` and `text` are fixed at creation; only `completed` ever changes,
/// and only by replacing the whole value via [`Todo::with_completed`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned by the store
    pub id: TodoId,
    /// Text of the item, never blank
    pub text: String,
    /// Whether the item is completed
    pub completed: bool,
}

impl Todo {
    /// Creates a new, not-yet-completed to-do item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }

    /// Copy of this item with `completed` overridden
    ///
    /// Functional update: the original value is left untouched, and the
    /// copy carries the same `id` and `text`.
    #[must_use]
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            id: self.id,
            text: self.text.clone(),
            completed,
        }
    }
}

/// State of the to-do list
///
/// Owned exclusively by the store; the presentation layer only ever sees
/// clones of it. Items live in insertion order, and `next_id` is the
/// counter for the next identifier to issue. The counter is independent
/// of the item count, so deleting items never causes an id to be issued
/// twice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListState {
    pub(crate) items: Vec<Todo>,
    pub(crate) next_id: TodoId,
}

impl TodoListState {
    /// Creates a new empty to-do list state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The items in display order
    #[must_use]
    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    /// Checks whether an item with the given id exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the list holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|todo| todo.completed).count()
    }
}

/// Actions the to-do list reducer processes
///
/// Each corresponds to one of the store's operations. Invalid inputs
/// (blank text, unknown ids) make the action a silent no-op rather than
/// an error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TodoAction {
    /// Append a new item; blank text (after trimming) is rejected silently
    Add {
        /// Text of the new item
        text: String,
    },

    /// Invert the completed flag of the matching item
    Toggle {
        /// Item to toggle
        id: TodoId,
    },

    /// Delete the matching item, preserving the order of the rest
    Remove {
        /// Item to delete
        id: TodoId,
    },
}
