//! # Subscription handles.
//!
//! [`Subscription`] is returned by [`Notifier::subscribe`](crate::Notifier::subscribe)
//! and is the only way (besides [`SubscriptionId`]) to remove a registration.
//! Identity is carried by an opaque id, never by closure equality.
//!
//! ## Rules
//! - `unsubscribe()` removes exactly one registration; later calls are no-ops.
//! - Dropping the handle unsubscribes.
//! - `detach()` keeps the registration for the notifier's whole lifetime.
//! - A handle that outlives its notifier is inert.

use std::fmt;
use std::sync::Arc;
use std::sync::Weak;
use std::sync::atomic::{AtomicBool, Ordering};

/// Opaque identifier of one registration inside a notifier.
///
/// Ids increase monotonically per notifier and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Removal side of a notifier, erased over the message type.
pub(crate) trait Detach: Send + Sync {
    fn remove(&self, id: SubscriptionId) -> bool;
}

/// Handle to one registration; unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately; use `detach()` to keep it"]
pub struct Subscription {
    id: SubscriptionId,
    live: Arc<AtomicBool>,
    owner: Weak<dyn Detach>,
    detached: bool,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, live: Arc<AtomicBool>, owner: Weak<dyn Detach>) -> Self {
        Self {
            id,
            live,
            owner,
            detached: false,
        }
    }

    /// Identifier of the underlying registration.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// True until the registration is removed (by this handle or by id).
    pub fn is_active(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Removes the registration. Calling this again is a no-op.
    ///
    /// Safe to call from inside a broadcast: a subscriber not yet reached in
    /// the running broadcast is skipped.
    pub fn unsubscribe(&self) {
        if !self.live.swap(false, Ordering::AcqRel) {
            tracing::trace!(subscription = %self.id, "unsubscribe on inactive subscription");
            return;
        }
        if let Some(owner) = self.owner.upgrade() {
            owner.remove(self.id);
        }
    }

    /// Gives up the handle without unsubscribing and returns the id, which
    /// can still be passed to [`Notifier::unsubscribe`](crate::Notifier::unsubscribe).
    pub fn detach(mut self) -> SubscriptionId {
        self.detached = true;
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.detached {
            self.unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
