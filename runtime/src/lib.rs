//! # Todolist Runtime
//!
//! Runtime implementation for the todolist architecture.
//!
//! This crate provides the Store runtime that coordinates reducer
//! execution, effect handling, and change notification.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and executes effects
//! - **Snapshot channel**: Broadcasts a fresh state snapshot after every
//!   state-changing action
//!
//! ## Example
//!
//! ```ignore
//! use todolist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//!
//! // Observe changes
//! let mut rx = store.subscribe();
//! rx.changed().await?;
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use todolist_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{watch, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown
        /// initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),
    }
}

pub use error::StoreError;
pub use store::Store;

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
///
/// Ensures the pending-effect counter is updated even if an effect task
/// panics.
struct PendingEffectGuard(Arc<AtomicUsize>);

impl Drop for PendingEffectGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store module - The runtime for reducers
///
/// The Store serializes all mutations behind a single write lock so that
/// every action observes and replaces the full state atomically, and it
/// publishes a snapshot to subscribers after each state-changing action.
pub mod store {
    use super::{
        watch, AtomicBool, AtomicUsize, Duration, Effect, Ordering, PendingEffectGuard, Reducer,
        RwLock, StoreError,
    };
    use std::sync::Arc;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`, single writer at a time)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. Change notification (snapshot channel)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(
    ///     TodoListState::default(),
    ///     TodoReducer::new(),
    ///     TodoEnvironment::default(),
    /// );
    ///
    /// store.send(TodoAction::Add { text: "buy milk".into() }).await?;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Snapshot channel for observing state changes.
        ///
        /// After every action that changed the state, a clone of the new
        /// state is published here. Actions that leave the state
        /// unchanged publish nothing, so subscribers are woken exactly
        /// once per successful mutation.
        snapshot_tx: watch::Sender<S>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Clone + PartialEq + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation (business logic)
        /// - `environment`: Injected dependencies
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (snapshot_tx, _) = watch::channel(initial_state.clone());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                snapshot_tx,
            }
        }

        /// Send an action to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Publishes a snapshot if the state changed
        /// 4. Executes returned effects asynchronously
        ///
        /// # Concurrency
        ///
        /// - The reducer executes synchronously while holding the write
        ///   lock; concurrent `send()` calls serialize there, so each
        ///   action sees the state left by the previous one
        /// - Subscribers are notified only after the lock is released,
        ///   never while an action is being applied
        /// - Effects execute in spawned tasks; `send()` returns after
        ///   starting them, not after they complete
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is
        /// shutting down.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates and halts the
        /// store. Reducers should be pure functions that do not panic.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError>
        where
            R: Clone,
            E: Clone,
        {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");

            let (effects, snapshot) = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                (effects, state.clone())
            };

            // Publish after the lock is dropped so observers never see a
            // partially applied action. Unchanged state publishes nothing.
            let notified = self.snapshot_tx.send_if_modified(|current| {
                if *current == snapshot {
                    false
                } else {
                    *current = snapshot;
                    true
                }
            });
            tracing::trace!(notified, "Snapshot channel updated");

            for effect in effects {
                self.execute_effect(effect);
            }

            Ok(())
        }

        /// Subscribe to state snapshots from this store
        ///
        /// Returns a receiver that holds the latest published snapshot.
        /// The receiver is woken after every action that changed the
        /// state; actions that were no-ops do not wake it.
        ///
        /// # Example
        ///
        /// ```ignore
        /// let mut rx = store.subscribe();
        /// while rx.changed().await.is_ok() {
        ///     render(&rx.borrow_and_update());
        /// }
        /// ```
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<S> {
            self.snapshot_tx.subscribe()
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the read lock is
        /// released promptly:
        ///
        /// ```ignore
        /// let count = store.state(|s| s.items.len()).await;
        /// ```
        ///
        /// # Arguments
        ///
        /// - `f`: Closure that receives a reference to state and returns a value
        ///
        /// # Returns
        ///
        /// The value returned by the closure
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// This method:
        /// 1. Sets the shutdown flag (rejecting new actions)
        /// 2. Waits for pending effects to complete (with timeout)
        ///
        /// # Arguments
        ///
        /// - `timeout`: Maximum time to wait for effects to complete
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires
        /// before all pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(
                        pending_effects = pending,
                        "Shutdown timeout: {} effects still running",
                        pending
                    );
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Execute an effect
        ///
        /// - `None`: No-op
        /// - `Future`: Spawns the async computation; a `Some` result is
        ///   sent back into the store as a new action
        ///
        /// Effect failures are logged and do not halt the store.
        fn execute_effect(&self, effect: Effect<A>)
        where
            R: Clone,
            E: Clone,
        {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = PendingEffectGuard(Arc::clone(&self.pending_effects));

                    let store = self.clone();
                    tokio::spawn(async move {
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            // Feedback loop: effects may produce actions
                            if let Err(error) = Box::pin(store.send(action)).await {
                                tracing::warn!(%error, "Dropped feedback action");
                            }
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                snapshot_tx: self.snapshot_tx.clone(),
            }
        }
    }
}
