//! Keyed UI state with per-key subscriptions.
//!
//! The store maps each [`StateKey`] to a [`StateValue`] and each key to an
//! ordered list of subscriber callbacks. Writes notify synchronously; there
//! is no batching, coalescing or dependency tracking between keys.

mod state;
mod store;

pub use state::{
    CartLine, ChatMessage, CommunityTab, Route, Sender, Snapshot, StateKey, StateValue,
};
pub use store::{Store, Subscription};
