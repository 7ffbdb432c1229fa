//! # Delivery policy for subscriber failures.
//!
//! [`Delivery`] decides what a broadcast does when one of its subscribers panics.
//!
//! - [`Delivery::Propagate`] the panic unwinds to the caller of `broadcast` and the
//!   remaining subscribers are **not** reached (default).
//! - [`Delivery::Isolate`] the panic is caught, logged with `tracing::warn!`, and
//!   delivery continues with the next subscriber.
//!
//! **Warning**: `Isolate` uses `AssertUnwindSafe`, which can leave shared state
//! inconsistent if a subscriber panics while holding a lock.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::SubscriptionId;

/// Policy controlling how a broadcast reacts to a panicking subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delivery {
    /// Let the panic unwind through `broadcast`; later subscribers miss the message.
    #[default]
    Propagate,
    /// Catch the panic, log it and keep delivering.
    Isolate,
}

impl Delivery {
    /// Invokes one subscriber according to this policy.
    pub(crate) fn deliver<T: ?Sized>(
        &self,
        channel: &str,
        id: SubscriptionId,
        callback: &(dyn Fn(&T) + Send + Sync),
        message: &T,
    ) {
        match self {
            Delivery::Propagate => callback(message),
            Delivery::Isolate => {
                if let Err(panic_err) = panic::catch_unwind(AssertUnwindSafe(|| callback(message)))
                {
                    tracing::warn!(
                        channel,
                        subscription = %id,
                        panic = %panic_message(&*panic_err),
                        "subscriber panicked; continuing delivery"
                    );
                }
            }
        }
    }
}

fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
