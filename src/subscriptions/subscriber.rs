//! Subscriber traits: the typed entry point and its type-erased form.

use std::any::Any;

/// A typed subscriber to state changes.
///
/// `State` is whatever shape the subscriber asked for at registration: the
/// full store state, or a substate derived through a transformed
/// subscription. Subscribers are registered behind `Arc` and notified
/// synchronously after every committed transition.
pub trait Subscriber: Send + Sync {
    /// The state shape this subscriber receives.
    type State: 'static;

    /// Called with each new value of the subscribed state.
    fn new_state(&self, state: &Self::State);
}

/// Type-erased subscriber entry point.
///
/// Bindings hold subscribers through this trait so the store can keep one
/// homogeneous collection no matter which substate each subscriber declared.
pub trait AnySubscriber: Send + Sync {
    /// Deliver a dynamically-typed new state value.
    ///
    /// The blanket impl downcasts to the declared [`Subscriber::State`]; a
    /// value of any other type is silently ignored.
    fn deliver(&self, state: &dyn Any);
}

impl<T> AnySubscriber for T
where
    T: Subscriber,
{
    fn deliver(&self, state: &dyn Any) {
        if let Some(state) = state.downcast_ref::<T::State>() {
            self.new_state(state);
        }
    }
}
