//! Main Store struct: owns state, reduces actions, notifies subscribers.

use crate::error::{Result, StoreError};
use crate::subscriptions::{
    AnySubscriber, Subscriber, SubscriberId, Subscription, SubscriptionBinding,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Pure transition function: next state from an action and the current state.
pub type Reducer<State, Action> = Box<dyn Fn(&Action, &State) -> State + Send + Sync>;

/// Clears the dispatch flag when a dispatch ends, including on unwind.
struct ClearFlag<'a>(&'a AtomicBool);

impl Drop for ClearFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The single source of truth for application state.
///
/// Provides a unified interface for:
/// - Reading the current state snapshot
/// - Registering subscribers, with optional substate transforms
/// - Dispatching actions through the reducer
/// - Removing subscribers by identity and sweeping dead ones
///
/// Subscribers are notified synchronously after every committed transition,
/// in registration order, each through its own subscription chain.
pub struct Store<State, Action> {
    /// Current state snapshot.
    state: RwLock<State>,

    /// Transition function applied by `dispatch`.
    reducer: Reducer<State, Action>,

    /// Live bindings in registration order.
    bindings: RwLock<Vec<Arc<SubscriptionBinding<State>>>>,

    /// Guards against re-entrant or concurrent dispatch.
    dispatching: AtomicBool,
}

impl<State, Action> Store<State, Action>
where
    State: Clone + Send + Sync + 'static,
{
    /// Create a store with its reducer and initial state.
    ///
    /// Nothing is dispatched and nobody is notified until the first
    /// subscriber registers or the first action arrives.
    pub fn new(reducer: Reducer<State, Action>, initial_state: State) -> Self {
        Self {
            state: RwLock::new(initial_state),
            reducer,
            bindings: RwLock::new(Vec::new()),
            dispatching: AtomicBool::new(false),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> State {
        self.state.read().clone()
    }

    // --- Subscriptions ---

    /// Register `subscriber` for the full state.
    ///
    /// Delivers the current state immediately, with no prior state to
    /// compare against. Re-subscribing an already-registered subscriber
    /// replaces its binding.
    pub fn subscribe<S>(&self, subscriber: &Arc<S>)
    where
        S: Subscriber<State = State> + 'static,
    {
        let erased: Arc<dyn AnySubscriber> = subscriber.clone();
        let binding =
            SubscriptionBinding::new(Subscription::new(), None::<Subscription<State>>, &erased);
        self.register(binding);
    }

    /// Register `subscriber` through a transformed subscription chain.
    ///
    /// `transform` receives the fresh original subscription and returns the
    /// chain the subscriber terminates: any combination of
    /// [`select`](Subscription::select), [`skip_repeats`](Subscription::skip_repeats)
    /// and [`skip_when`](Subscription::skip_when). The current state is
    /// delivered immediately through the new chain.
    pub fn subscribe_with<S, Substate, F>(&self, subscriber: &Arc<S>, transform: F)
    where
        S: Subscriber<State = Substate> + 'static,
        Substate: 'static,
        F: FnOnce(&Subscription<State>) -> Subscription<Substate>,
    {
        let original = Subscription::new();
        let transformed = transform(&original);
        let erased: Arc<dyn AnySubscriber> = subscriber.clone();
        let binding = SubscriptionBinding::new(original, Some(transformed), &erased);
        self.register(binding);
    }

    fn register(&self, binding: SubscriptionBinding<State>) {
        let binding = Arc::new(binding);
        let id = binding.subscriber_id();

        {
            let mut bindings = self.bindings.write();
            // Re-subscribing replaces the previous binding for this identity.
            bindings.retain(|existing| existing.subscriber_id() != id);
            bindings.push(Arc::clone(&binding));
            debug!(subscriber = ?id, total = bindings.len(), "subscriber registered");
        }

        // First delivery: no prior state to compare against. Runs without
        // holding the binding or state locks so the callback may re-enter.
        let current = self.state.read().clone();
        binding.new_values(None, &current);
    }

    /// Remove `subscriber`'s binding. Returns whether one was removed.
    pub fn unsubscribe<S>(&self, subscriber: &Arc<S>) -> bool
    where
        S: Subscriber,
    {
        self.unsubscribe_id(SubscriberId::of(subscriber))
    }

    /// Remove the binding with the given identity token. Returns whether one
    /// was removed.
    pub fn unsubscribe_id(&self, id: SubscriberId) -> bool {
        let mut bindings = self.bindings.write();
        let before = bindings.len();
        bindings.retain(|binding| binding.subscriber_id() != id);
        let removed = bindings.len() < before;
        if removed {
            debug!(subscriber = ?id, total = bindings.len(), "subscriber removed");
        }
        removed
    }

    /// Number of registered bindings, dead ones included.
    pub fn subscription_count(&self) -> usize {
        self.bindings.read().len()
    }

    /// Drop bindings whose subscriber has been dropped. Returns how many
    /// were removed.
    pub fn prune_dead_subscribers(&self) -> usize {
        let mut bindings = self.bindings.write();
        let before = bindings.len();
        bindings.retain(|binding| !binding.is_dead());
        let pruned = before - bindings.len();
        if pruned > 0 {
            warn!(pruned, total = bindings.len(), "swept dead subscriber bindings");
        }
        pruned
    }

    // --- Dispatch ---

    /// Apply `action` through the reducer, commit the new state, and notify
    /// every live subscriber with the `(old, new)` pair.
    ///
    /// Dispatch is exclusive: a call made while another dispatch is running,
    /// whether re-entrantly from a reducer or subscriber callback or from
    /// another thread, fails with [`StoreError::DispatchInProgress`] and
    /// leaves the running dispatch undisturbed.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        if self.dispatching.swap(true, Ordering::Acquire) {
            return Err(StoreError::DispatchInProgress);
        }
        let _clear = ClearFlag(&self.dispatching);

        // The reducer runs without any lock held, so it may read `state()`.
        let old_state = self.state.read().clone();
        let new_state = (self.reducer)(&action, &old_state);
        *self.state.write() = new_state.clone();

        // Notify a snapshot of the bindings so callbacks may subscribe or
        // unsubscribe without deadlocking. Deliveries happen in registration
        // order.
        let bindings: Vec<_> = self.bindings.read().clone();
        trace!(subscribers = bindings.len(), "state committed, notifying");
        for binding in &bindings {
            binding.new_values(Some(&old_state), &new_state);
        }

        self.prune_dead_subscribers();
        Ok(())
    }
}
