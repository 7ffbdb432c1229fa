//! # Trailing-edge debounce.
//!
//! [`Debouncer`] delays a callback until calls stop arriving for `wait`.
//! Every new call cancels the pending one, so only the last call of a burst fires.
//!
//! ```text
//! call(a) ──┐ cancel
//! call(b) ──┤ cancel
//! call(c) ──┴──── wait ────► callback(c)
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::sync::lock;
use crate::wait::later;

/// Debounced callback taking `A`.
pub struct Debouncer<A> {
    wait: Duration,
    callback: Arc<dyn Fn(A) + Send + Sync>,
    pending: Mutex<Option<CancellationToken>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Creates a debouncer that invokes `callback` once calls pause for `wait`.
    pub fn new<F>(wait: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            wait,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    /// Schedules `callback(args)`, cancelling whatever was pending.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn call(&self, args: A) {
        let token = CancellationToken::new();
        if let Some(previous) = lock(&self.pending).replace(token.clone()) {
            previous.cancel();
        }

        let callback = Arc::clone(&self.callback);
        let wait = self.wait;
        tokio::spawn(async move {
            select! {
                biased;
                _ = token.cancelled() => {}
                _ = later(wait) => callback(args),
            }
        });
    }

    /// Drops the pending invocation, if any.
    pub fn cancel(&self) {
        if let Some(previous) = lock(&self.pending).take() {
            previous.cancel();
        }
    }

    /// Quiet period of this debouncer.
    pub fn wait(&self) -> Duration {
        self.wait
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(previous) = lock(&self.pending).take() {
            previous.cancel();
        }
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer").field("wait", &self.wait).finish()
    }
}
