//! The to-do list store.
//!
//! [`TodoListStore`] is the single owner of the list's authoritative
//! state. The presentation layer talks to it through the four named
//! operations plus a subscription for redraw notifications; there is no
//! other way to reach the list.

use std::time::Duration;

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{Todo, TodoAction, TodoId, TodoListState};
use todolist_runtime::{Store, StoreError};
use tokio::sync::watch;

/// Sole authority over the to-do collection's contents and identifiers
///
/// A thin facade over the generic runtime [`Store`] that fixes the
/// state, action, and reducer types and names the operations after the
/// domain. Cloning the store clones a handle; all clones share the same
/// underlying list.
///
/// # Example
///
/// ```ignore
/// let store = TodoListStore::new();
///
/// store.add("buy milk").await?;
/// store.add("wash car").await?;
///
/// let items = store.snapshot().await;
/// store.toggle(items[0].id).await?;
/// store.remove(items[1].id).await?;
/// ```
#[derive(Clone)]
pub struct TodoListStore {
    inner: Store<TodoListState, TodoAction, TodoEnvironment, TodoReducer>,
}

impl TodoListStore {
    /// Creates a store with an empty list
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Store::new(TodoListState::new(), TodoReducer::new(), TodoEnvironment),
        }
    }

    /// Append a new item with the given text
    ///
    /// The text is trimmed first; if nothing remains the call is a
    /// silent no-op. Otherwise the item gets a fresh id and lands at
    /// the end of the list, not yet completed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is
    /// shutting down.
    pub async fn add(&self, text: impl Into<String>) -> Result<(), StoreError> {
        self.inner
            .send(TodoAction::Add { text: text.into() })
            .await
    }

    /// Invert the completed flag of the item with the given id
    ///
    /// Unknown ids are a silent no-op. Applying toggle twice restores
    /// the original value; `id` and `text` never change.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is
    /// shutting down.
    pub async fn toggle(&self, id: TodoId) -> Result<(), StoreError> {
        self.inner.send(TodoAction::Toggle { id }).await
    }

    /// Delete the item with the given id
    ///
    /// Unknown ids are a silent no-op. The relative order of the
    /// remaining items is preserved, and the id is never reissued.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is
    /// shutting down.
    pub async fn remove(&self, id: TodoId) -> Result<(), StoreError> {
        self.inner.send(TodoAction::Remove { id }).await
    }

    /// Read-only copy of the items in display order
    ///
    /// The returned vector is the caller's own; mutating it cannot
    /// touch the store's state.
    #[must_use = "snapshot() copies the list; ignoring it does nothing"]
    pub async fn snapshot(&self) -> Vec<Todo> {
        self.inner.state(|s| s.items().to_vec()).await
    }

    /// Read state via a closure, without copying the whole list
    ///
    /// ```ignore
    /// let open = store.with_state(|s| s.len() - s.completed_count()).await;
    /// ```
    pub async fn with_state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TodoListState) -> T,
    {
        self.inner.state(f).await
    }

    /// Subscribe to list changes
    ///
    /// The receiver holds the latest state and is woken after every
    /// mutation that changed the list - and never for a no-op, so the
    /// presentation layer redraws exactly when something is different.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TodoListState> {
        self.inner.subscribe()
    }

    /// Shut the store down, rejecting further operations
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if in-flight work does
    /// not finish within `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.inner.shutdown(timeout).await
    }
}

impl Default for TodoListStore {
    fn default() -> Self {
        Self::new()
    }
}
