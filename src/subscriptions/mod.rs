//! Subscription system: typed subscribers fed through transformation chains.
//!
//! This module provides the delivery core the store drives after every state
//! transition:
//! - [`Subscription`]: a chain node over `(old, new)` state pairs, with
//!   repeat-skipping filter stages and substate selection
//! - [`SubscriptionBinding`]: type-erased binding of one subscriber to its
//!   chain, keyed by subscriber identity
//! - [`Subscriber`] / [`AnySubscriber`]: the typed entry point and the
//!   existential form the binding actually holds
//!
//! Delivery is synchronous and unbuffered. Subscribers are held weakly; a
//! dropped subscriber turns its binding into a silent no-op until the store
//! removes it.
//!
//! # Example
//!
//! ```ignore
//! // Substate selection with change-skipping, wired by the store:
//! store.subscribe_with(&badge, |subscription| {
//!     subscription.select(|state| state.unread_count).skip_repeats()
//! });
//!
//! // The same chain, built by hand:
//! let original = Subscription::new();
//! let counts = original.select(|state: &AppState| state.unread_count);
//! let binding = SubscriptionBinding::new(original, Some(counts), &subscriber);
//! binding.new_values(None, &state);
//! ```

mod binding;
mod chain;
mod subscriber;

pub use binding::{SubscriberId, SubscriptionBinding};
pub use chain::{Sink, Subscription};
pub use subscriber::{AnySubscriber, Subscriber};
