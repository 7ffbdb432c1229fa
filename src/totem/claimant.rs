//! # Participants of a totem group.
//!
//! A [`Claimant`] moves between two states:
//! ```text
//!            claim(p)                      claim(q) by another claimant
//! Unowned ────────────► Owned ──────────────────────────────────────► Unowned
//!    ▲                    │
//!    └──── release() ─────┘
//! ```
//!
//! ## Rules
//! - `claim` while holding the token is a no-op (no broadcast at all).
//! - `release` while not holding the token is a no-op.
//! - The previous holder reaches `Unowned` before the new holder reaches `Owned`.
//! - Dropping a claimant that holds the token releases it.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::notify::{Delivery, Notifier, Subscription};
use crate::sync::lock;

use super::Totem;

/// State shared between a claimant and its revoke listener.
struct ClaimState {
    id: u64,
    owned: AtomicBool,
    /// Registration on the totem's revoke channel; present while holding the token.
    token: Mutex<Option<Subscription>>,
    ownership: Notifier<bool>,
}

impl ClaimState {
    fn holds_token(&self) -> bool {
        lock(&self.token).is_some()
    }

    /// Drops the token and reports `false` if the claimant was an owner.
    fn revoke(&self) {
        let token = lock(&self.token).take();
        if let Some(token) = token {
            token.unsubscribe();
        }
        if self.owned.swap(false, Ordering::AcqRel) {
            tracing::debug!(claimant = self.id, "ownership revoked");
            self.ownership.broadcast(&false);
        }
    }
}

/// A participant that can take exclusive ownership of the group's token.
pub struct Claimant<P: Send + Sync + 'static> {
    totem: Totem<P>,
    state: Arc<ClaimState>,
}

impl<P: Send + Sync + 'static> Claimant<P> {
    pub(super) fn new(totem: Totem<P>, id: u64, delivery: Delivery) -> Self {
        Self {
            totem,
            state: Arc::new(ClaimState {
                id,
                owned: AtomicBool::new(false),
                token: Mutex::new(None),
                ownership: Notifier::labeled(format!("totem.claimant.{id}"), delivery),
            }),
        }
    }

    /// Identifier of this claimant within its group (diagnostics only).
    pub fn id(&self) -> u64 {
        self.state.id
    }

    /// Takes the token, revoking it from its current holder.
    ///
    /// Observers receive `payload` on the totem's change channel.
    pub fn claim(&self, payload: impl Into<Option<P>>) {
        if self.state.holds_token() {
            tracing::trace!(claimant = self.state.id, "claim while holding; ignored");
            return;
        }

        self.totem.revoke.broadcast(&());

        let weak = Arc::downgrade(&self.state);
        let token = self.totem.revoke.subscribe(move |_| {
            if let Some(state) = weak.upgrade() {
                state.revoke();
            }
        });
        *lock(&self.state.token) = Some(token);
        tracing::debug!(claimant = self.state.id, "ownership claimed");

        self.totem.publish(payload.into());

        // an observer may have handed the token to someone else meanwhile
        if self.state.holds_token() && !self.state.owned.swap(true, Ordering::AcqRel) {
            self.state.ownership.broadcast(&true);
        }
    }

    /// Gives the token back, leaving the group without an owner.
    ///
    /// Observers receive `None` on the totem's change channel.
    pub fn release(&self) {
        if !self.state.holds_token() {
            tracing::trace!(claimant = self.state.id, "release while not holding; ignored");
            return;
        }
        self.totem.revoke.broadcast(&());
        self.totem.publish(None);
    }

    /// True while this claimant holds the token.
    pub fn is_owner(&self) -> bool {
        self.state.owned.load(Ordering::Acquire)
    }

    /// Subscribes to this claimant's own transitions (`true` on claim, `false` on
    /// revoke/release). Other claimants' transitions are not reported here.
    pub fn on_ownership<F>(&self, callback: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.state.ownership.subscribe(move |owned| callback(*owned))
    }

    /// The coordinator this claimant belongs to.
    pub fn totem(&self) -> &Totem<P> {
        &self.totem
    }
}

impl<P: Send + Sync + 'static> Drop for Claimant<P> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<P: Send + Sync + 'static> fmt::Debug for Claimant<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claimant")
            .field("id", &self.state.id)
            .field("owned", &self.is_owner())
            .finish()
    }
}
