//! Type-erased binding between one subscriber and its subscription chain.

use super::chain::Subscription;
use super::subscriber::AnySubscriber;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

/// Stable identity token for a subscriber object.
///
/// Derived from the subscriber's allocation address, so it compares equal
/// whether taken from the concrete `Arc` or its type-erased coercion. A
/// binding keeps a weak reference to the allocation, which prevents the
/// address from being recycled while the token is in use.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

impl SubscriberId {
    /// Identity of the object behind `subscriber`.
    pub fn of<T: ?Sized>(subscriber: &Arc<T>) -> Self {
        SubscriberId(Arc::as_ptr(subscriber) as *const () as usize)
    }
}

impl fmt::Debug for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriberId({:#x})", self.0)
    }
}

fn terminal_observer<T: 'static>(
    subscriber: &Weak<dyn AnySubscriber>,
) -> impl Fn(Option<&T>, &T) + Send + Sync + 'static {
    let subscriber = subscriber.clone();
    move |_old, new| {
        if let Some(subscriber) = subscriber.upgrade() {
            subscriber.deliver(new);
        }
    }
}

/// Binds one subscriber to one subscription pair behind a type-erased
/// delivery interface.
///
/// The binding owns the original (full-state) subscription and wires exactly
/// one terminal observer: onto the transformed chain when one is supplied,
/// onto the original otherwise. It holds the subscriber weakly; once the
/// subscriber is dropped, delivery becomes a no-op and the binding waits to
/// be removed by identity.
pub struct SubscriptionBinding<S> {
    original: Subscription<S>,
    subscriber: Weak<dyn AnySubscriber>,
    id: SubscriberId,
}

impl<S: 'static> SubscriptionBinding<S> {
    /// Bind `subscriber` to `original`, terminating on `transformed` when
    /// one is supplied.
    ///
    /// The transformed chain must have been built off `original` (through
    /// [`Subscription::select`] or a filter stage) so that driving the
    /// original reaches it; the binding itself only ever drives the original.
    pub fn new<T: 'static>(
        original: Subscription<S>,
        transformed: Option<Subscription<T>>,
        subscriber: &Arc<dyn AnySubscriber>,
    ) -> Self {
        let id = SubscriberId::of(subscriber);
        let subscriber = Arc::downgrade(subscriber);

        // Exactly one terminal wiring. The transformed handle can be dropped
        // afterwards: the chain stays reachable from the original's observer.
        match transformed {
            Some(chain) => chain.set_observer(terminal_observer(&subscriber)),
            None => original.set_observer(terminal_observer(&subscriber)),
        }

        Self {
            original,
            subscriber,
            id,
        }
    }

    /// Feed one state transition into the chain.
    ///
    /// Always drives the original subscription; a transformed chain receives
    /// the value by being chained off it.
    pub fn new_values(&self, old: Option<&S>, new: &S) {
        self.original.new_values(old, new);
    }

    /// Identity token of the bound subscriber.
    pub fn subscriber_id(&self) -> SubscriberId {
        self.id
    }

    /// Whether the bound subscriber has been dropped.
    pub fn is_dead(&self) -> bool {
        self.subscriber.strong_count() == 0
    }
}

impl<S> fmt::Debug for SubscriptionBinding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionBinding")
            .field("id", &self.id)
            .field("dead", &(self.subscriber.strong_count() == 0))
            .finish()
    }
}

impl<S> PartialEq for SubscriptionBinding<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S> Eq for SubscriptionBinding<S> {}

impl<S> Hash for SubscriptionBinding<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
