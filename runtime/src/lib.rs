//! # Storefront Runtime
//!
//! Runtime implementation for the storefront reducer architecture.
//!
//! This crate provides the [`Store`] runtime that coordinates reducer
//! execution and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: the runtime that manages state and executes effects
//! - **Effect executor**: executes effect descriptions and feeds produced
//!   actions back into the reducer
//! - **Action broadcast**: every processed action is broadcast to
//!   observers, which is how a view layer watches a session progress
//!
//! ## Execution Model
//!
//! A storefront session is a single logical thread of control: the store
//! processes one action at a time, and the effects an action produces are
//! awaited before the next queued action runs. [`Store::send`] drives the
//! complete cascade - the action itself plus every follow-up action its
//! effects produce - and only returns once the cascade has settled. There
//! is no background effect pool and nothing is retried: a failed external
//! call is reported back to the reducer as a regular action, and retrying
//! is a user decision.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action and wait for its effects to settle
//! store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field.clone()).await;
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use futures::future::BoxFuture;
use storefront_core::effect::Effect;
use storefront_core::reducer::Reducer;
use tokio::sync::{RwLock, broadcast};

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind an async `RwLock` for concurrent reads)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with the action feedback loop)
///
/// Cloning a Store is cheap and yields a handle onto the **same** state
/// and broadcast channel, so a view layer can hold its own handle.
///
/// # Type Parameters
///
/// - `S`: state type
/// - `A`: action type
/// - `E`: environment type
/// - `R`: reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
    /// Action broadcast channel for observing processed actions.
    ///
    /// All actions run through the reducer - the ones callers send and the
    /// ones effects feed back - are broadcast in processing order.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// The action broadcast channel is created with capacity 16; use
    /// [`Store::with_broadcast_capacity`] if observers are slow.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
    }

    /// Create a new store with a custom action broadcast capacity
    ///
    /// # Arguments
    ///
    /// - `initial_state`: the starting state for the store
    /// - `reducer`: the reducer implementation (business logic)
    /// - `environment`: injected dependencies
    /// - `capacity`: broadcast channel capacity (actions buffered per
    ///   observer before it starts lagging)
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
            action_broadcast,
        }
    }

    /// Send an action and drive its effect cascade to completion
    ///
    /// The action is run through the reducer, its effects are executed in
    /// order, and every action an effect produces is queued and processed
    /// the same way. Returns once no queued actions remain.
    ///
    /// Callers are expected to serialize sends per session; concurrent
    /// sends interleave at action granularity (state is only locked for
    /// the duration of a single `reduce` call).
    pub async fn send(&self, action: A) {
        let mut queue: VecDeque<A> = VecDeque::new();
        queue.push_back(action);

        while let Some(action) = queue.pop_front() {
            let effects = {
                let mut state = self.state.write().await;
                self.reducer
                    .reduce(&mut *state, action.clone(), self.environment.as_ref())
            };

            // Broadcast before running the effects so observers see actions
            // in causal order. Send errors just mean nobody is listening.
            let _ = self.action_broadcast.send(action);

            tracing::trace!(effects = effects.len(), queued = queue.len(), "action reduced");

            for effect in effects {
                queue.extend(Self::execute(effect).await);
            }
        }
    }

    /// Read the current state through a closure
    ///
    /// The closure runs under a read lock; keep it short and return owned
    /// data.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&*state)
    }

    /// Read a full clone of the current state
    ///
    /// Convenience over `state(Clone::clone)` for small state types.
    pub async fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.state(Clone::clone).await
    }

    /// Subscribe to the action broadcast
    ///
    /// The receiver yields every action the store processes from this
    /// point on, in processing order.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Execute a single effect, returning the actions it produced
    fn execute(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
        Box::pin(async move {
            match effect {
                Effect::None => Vec::new(),
                Effect::Future(future) => future.await.into_iter().collect(),
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    vec![*action]
                },
                Effect::Sequential(effects) => {
                    let mut produced = Vec::new();
                    for effect in effects {
                        produced.extend(Self::execute(effect).await);
                    }
                    produced
                },
                Effect::Parallel(effects) => {
                    futures::future::join_all(effects.into_iter().map(Self::execute))
                        .await
                        .into_iter()
                        .flatten()
                        .collect()
                },
            }
        })
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}
