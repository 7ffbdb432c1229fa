//! # The coordinator shared by one mutual-exclusion group.
//!
//! [`Totem`] is constructed once per group and cloned into every participant.
//! It owns two channels:
//! - `revoke` (no payload): broadcast before every claim and on release; the current
//!   holder's listener is the only subscriber.
//! - `changed` (`Option<P>`): the new holder's payload, or `None` once released.
//!
//! Every change is stamped with a generation. A claim made from inside a `changed`
//! callback publishes a newer generation; the outer broadcast then skips the observers
//! it has not reached yet, so no observer ends on a payload nobody holds.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::Config;
use crate::notify::{Delivery, Notifier, Subscription};

use super::{Claimant, Watch};

/// One published ownership change.
pub(super) struct Change<P> {
    generation: u64,
    payload: Option<P>,
}

/// Single-owner coordinator.
///
/// Cheap to clone; clones coordinate the same group.
pub struct Totem<P> {
    pub(super) revoke: Notifier<()>,
    pub(super) changed: Notifier<Change<P>>,
    generation: Arc<AtomicU64>,
    delivery: Delivery,
    next_claimant: Arc<AtomicU64>,
}

impl<P: Send + Sync + 'static> Totem<P> {
    /// Creates a coordinator with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates a coordinator whose channels follow `config.delivery`.
    pub fn with_config(config: &Config) -> Self {
        Self {
            revoke: Notifier::labeled("totem.revoke", config.delivery),
            changed: Notifier::labeled("totem.changed", config.delivery),
            generation: Arc::new(AtomicU64::new(0)),
            delivery: config.delivery,
            next_claimant: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Registers a new participant. It starts out without the token.
    pub fn claimant(&self) -> Claimant<P> {
        let id = self.next_claimant.fetch_add(1, Ordering::Relaxed);
        Claimant::new(self.clone(), id, self.delivery)
    }

    /// Subscribes a passive observer to ownership changes.
    ///
    /// `callback` receives the new holder's payload, or `None` when the token is released.
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&P>) + Send + Sync + 'static,
    {
        let generation = Arc::clone(&self.generation);
        self.changed.subscribe(move |change| {
            if change.generation == generation.load(Ordering::Acquire) {
                callback(change.payload.as_ref());
            }
        })
    }

    /// Broadcasts `payload` as the newest change.
    pub(super) fn publish(&self, payload: Option<P>) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.changed.broadcast(&Change {
            generation,
            payload,
        });
    }

    /// True while some claimant holds the token.
    pub fn is_held(&self) -> bool {
        !self.revoke.is_empty()
    }
}

impl<P: Clone + Send + Sync + 'static> Totem<P> {
    /// Creates a [`Watch`] that remembers the latest payload.
    ///
    /// A watch starts empty: it only learns about claims made after it was created.
    pub fn watch(&self) -> Watch<P> {
        Watch::new(self, |_| {})
    }

    /// Like [`Totem::watch`], and also calls `on_update` after every change
    /// (typically the observer's redraw trigger).
    pub fn watch_with<F>(&self, on_update: F) -> Watch<P>
    where
        F: Fn(Option<&P>) + Send + Sync + 'static,
    {
        Watch::new(self, on_update)
    }
}

impl<P: Send + Sync + 'static> Default for Totem<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for Totem<P> {
    fn clone(&self) -> Self {
        Self {
            revoke: self.revoke.clone(),
            changed: self.changed.clone(),
            generation: Arc::clone(&self.generation),
            delivery: self.delivery,
            next_claimant: Arc::clone(&self.next_claimant),
        }
    }
}

impl<P> fmt::Debug for Totem<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Totem")
            .field("revoke", &self.revoke)
            .field("changed", &self.changed)
            .finish()
    }
}
