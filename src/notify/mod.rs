//! Synchronous publish/subscribe: the [`Notifier`] and its handles.
//!
//! This module groups the broadcast **channel** used by every coordination
//! primitive in the crate and the **handles** returned to subscribers.
//!
//! ## Contents
//! - [`Notifier`] ordered multi-subscriber channel (subscribe / unsubscribe / broadcast)
//! - [`Subscription`] RAII handle that removes exactly one registration
//! - [`SubscriptionId`] opaque token identifying a registration
//! - [`Delivery`] what happens when a subscriber panics mid-broadcast
//!
//! ## Quick reference
//! ```text
//! notifier.subscribe(cb1) ─► Subscription(#0)
//! notifier.subscribe(cb2) ─► Subscription(#1)
//!
//! notifier.broadcast(&msg)
//!     ├─► snapshot [#0, #1]        (lock released here)
//!     ├─► cb1(&msg)                (skipped if #0 was removed meanwhile)
//!     └─► cb2(&msg)
//! ```
//!
//! - **Publishers**: `Totem` (revoke / changed), `Claimant` (ownership), hooks.
//! - **Consumers**: claimants' revoke listeners, `Watch`, host re-render callbacks.

mod delivery;
mod notifier;
mod subscription;

pub use delivery::Delivery;
pub use notifier::Notifier;
pub use subscription::{Subscription, SubscriptionId};
