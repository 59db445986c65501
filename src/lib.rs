//! # Statecast
//!
//! A single-store state container where every change flows one way: actions
//! are dispatched, a reducer produces the next state, and subscribers are
//! notified synchronously through per-subscriber transformation chains.
//!
//! ## Core Concepts
//!
//! - **Store**: owns the state, applies the reducer, drives every binding
//! - **Subscription**: a chain of filter and mapping stages over `(old, new)`
//!   state pairs
//! - **SubscriptionBinding**: type-erased link between a subscriber and its
//!   chain, keyed by subscriber identity
//! - **Events**: a closed catalog of analytics and lifecycle records, usable
//!   as state payloads
//!
//! ## Example
//!
//! ```ignore
//! use statecast::{Store, Subscriber};
//!
//! let store = Store::new(
//!     Box::new(|action, state| match action {
//!         Action::Increment => state + 1,
//!         Action::Set(value) => *value,
//!     }),
//!     0,
//! );
//!
//! // Full-state subscriber
//! store.subscribe(&display);
//!
//! // Only distinct values of a derived substate
//! store.subscribe_with(&badge, |subscription| {
//!     subscription.select(|state| *state).skip_repeats()
//! });
//!
//! store.dispatch(Action::Increment)?;
//! ```

pub mod error;
pub mod events;
pub mod store;
pub mod subscriptions;

// Re-exports
pub use error::{Result, StoreError};
pub use events::{Event, EventKind, EventParams};
pub use store::{Reducer, Store};
pub use subscriptions::{
    AnySubscriber, Sink, Subscriber, SubscriberId, Subscription, SubscriptionBinding,
};
