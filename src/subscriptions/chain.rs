//! Transformation chain over a stream of state-change pairs.

use parking_lot::RwLock;
use std::sync::Arc;

/// Terminal delivery function handed to a sink installer.
pub type Sink<S> = Box<dyn Fn(Option<&S>, &S) + Send + Sync>;

/// Observer callback wired into a chain node.
type Observer<S> = Arc<dyn Fn(Option<&S>, &S) + Send + Sync>;

/// One node in a transformation chain over `(old, new)` state pairs.
///
/// A node holds at most one observer, unset until wired and reassignable.
/// Delivery is synchronous and unbuffered: [`new_values`](Self::new_values)
/// invokes the current observer or does nothing. Filter and mapping stages
/// ([`skip_repeats_by`](Self::skip_repeats_by), [`select`](Self::select))
/// return a new downstream node and reassign the receiver's observer to feed
/// it, so driving the chain's root drives every stage built from it.
///
/// Cloning a `Subscription` yields a second handle to the same node, not a
/// new node.
pub struct Subscription<S> {
    observer: Arc<RwLock<Option<Observer<S>>>>,
}

impl<S> Clone for Subscription<S> {
    fn clone(&self) -> Self {
        Self {
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<S: 'static> Subscription<S> {
    /// Create a bare node with no observer.
    pub fn new() -> Self {
        Self {
            observer: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a node and hand its delivery function to `install`.
    ///
    /// `install` runs exactly once, immediately, and receives a [`Sink`] that
    /// forwards `(old, new)` pairs into the new node. No values are delivered
    /// during construction.
    pub fn with_sink<F>(install: F) -> Self
    where
        F: FnOnce(Sink<S>),
    {
        let subscription = Subscription::new();
        let downstream = subscription.clone();
        install(Box::new(move |old, new| downstream.new_values(old, new)));
        subscription
    }

    /// Install or replace this node's observer.
    pub fn set_observer<F>(&self, observer: F)
    where
        F: Fn(Option<&S>, &S) + Send + Sync + 'static,
    {
        *self.observer.write() = Some(Arc::new(observer));
    }

    /// Deliver a pair to the current observer, if one is wired.
    ///
    /// `old` is `None` on the first delivery after subscribing. Calling this
    /// with no observer installed is a silent no-op.
    pub fn new_values(&self, old: Option<&S>, new: &S) {
        let observer = self.observer.read().clone();
        if let Some(observer) = observer {
            observer(old, new);
        }
    }

    // --- Chain stages ---

    /// Chain a filter stage that suppresses repeated values.
    ///
    /// The returned node forwards every pair except those where `old` is
    /// present and `is_repeat(old, new)` holds; a pair with no prior state
    /// always forwards. The receiver's observer is reassigned to feed the
    /// filter, so the receiver becomes the filter's input stage. Chaining
    /// twice composes both filters, short-circuiting at the first one that
    /// suppresses.
    pub fn skip_repeats_by<F>(&self, is_repeat: F) -> Subscription<S>
    where
        F: Fn(&S, &S) -> bool + Send + Sync + 'static,
    {
        let upstream = self.clone();
        Subscription::with_sink(move |sink| {
            upstream.set_observer(move |old, new| match old {
                Some(previous) if is_repeat(previous, new) => {}
                _ => sink(old, new),
            });
        })
    }

    /// Alias for [`skip_repeats_by`](Self::skip_repeats_by), for call-site
    /// readability.
    pub fn skip_when<F>(&self, is_repeat: F) -> Subscription<S>
    where
        F: Fn(&S, &S) -> bool + Send + Sync + 'static,
    {
        self.skip_repeats_by(is_repeat)
    }

    /// Chain a mapping stage over a derived substate.
    ///
    /// The receiver's observer is reassigned to map each pair through the
    /// pure `selector` and re-emit into the returned node, so driving the
    /// receiver drives the derived chain. Filters compose on either side.
    pub fn select<T, F>(&self, selector: F) -> Subscription<T>
    where
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let upstream = self.clone();
        Subscription::with_sink(move |sink| {
            upstream.set_observer(move |old, new| {
                let old_mapped = old.map(&selector);
                let new_mapped = selector(new);
                sink(old_mapped.as_ref(), &new_mapped);
            });
        })
    }
}

impl<S: PartialEq + 'static> Subscription<S> {
    /// Chain a filter stage that suppresses pairs of equal values.
    pub fn skip_repeats(&self) -> Subscription<S> {
        self.skip_repeats_by(|old, new| old == new)
    }
}

impl<S: 'static> Default for Subscription<S> {
    fn default() -> Self {
        Self::new()
    }
}
