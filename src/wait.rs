//! # Deferral and bounded waits.
//!
//! - [`later`] sleeps for a delay; used to run work after the host finished its
//!   current update cycle.
//! - [`wait_until`] polls a predicate with a [`PollPolicy`] and gives up after the
//!   policy's budget.
//! - [`Deferral`] tags which of the two a caller wants, resolved by [`Deferral::run`].
//!
//! ## Flow
//! ```text
//! wait_until(pred, policy)
//! loop {
//!   ├─► checks += 1
//!   ├─► pred() == true            ─► Ok(checks)
//!   ├─► checks > policy.budget    ─► Err(WaitError::Exhausted { checks })
//!   └─► sleep(policy.delay(checks - 1))
//! }
//! ```
//!
//! The budget is an iteration cap, not a timeout: the total wall time depends on the
//! predicate's own cost.

use std::fmt;
use std::time::Duration;

use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::error::WaitError;
use crate::policies::PollPolicy;

/// Sleeps for `delay`.
pub async fn later(delay: Duration) {
    tokio::time::sleep(delay).await;
}

/// Polls `predicate` until it holds or the policy's budget is spent.
///
/// Returns the number of checks performed (the first check happens immediately).
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use totem::{PollPolicy, wait_until};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut calls = 0;
/// let checks = wait_until(
///     || { calls += 1; calls == 3 },
///     &PollPolicy::fixed(Duration::from_millis(1), 10),
/// )
/// .await
/// .unwrap();
/// assert_eq!(checks, 3);
/// # }
/// ```
pub async fn wait_until<F>(predicate: F, policy: &PollPolicy) -> Result<u32, WaitError>
where
    F: FnMut() -> bool,
{
    wait_until_cancellable(predicate, policy, &CancellationToken::new()).await
}

/// Like [`wait_until`], but stops with [`WaitError::Cancelled`] once `token` is cancelled.
pub async fn wait_until_cancellable<F>(
    mut predicate: F,
    policy: &PollPolicy,
    token: &CancellationToken,
) -> Result<u32, WaitError>
where
    F: FnMut() -> bool,
{
    let budget = policy.effective_budget();
    let mut checks: u32 = 0;

    loop {
        if token.is_cancelled() {
            return Err(WaitError::Cancelled);
        }
        checks = checks.saturating_add(1);
        if predicate() {
            return Ok(checks);
        }

        let attempt = checks - 1;
        if attempt >= budget {
            tracing::debug!(checks, budget, "bounded wait exhausted");
            return Err(WaitError::Exhausted { checks });
        }

        select! {
            _ = token.cancelled() => return Err(WaitError::Cancelled),
            _ = later(policy.delay(attempt)) => {}
        }
    }
}

/// Either a plain delay or a predicate to wait for.
pub enum Deferral {
    /// Sleep for the given duration.
    Delay(Duration),
    /// Poll until the predicate holds.
    Until(Box<dyn FnMut() -> bool + Send>),
}

impl Deferral {
    /// Builds a [`Deferral::Until`] from a closure.
    pub fn until<F>(predicate: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        Deferral::Until(Box::new(predicate))
    }

    /// Runs the deferral. A delay never fails; a predicate may exhaust `policy`.
    pub async fn run(self, policy: &PollPolicy) -> Result<(), WaitError> {
        match self {
            Deferral::Delay(delay) => {
                later(delay).await;
                Ok(())
            }
            Deferral::Until(predicate) => wait_until(predicate, policy).await.map(|_| ()),
        }
    }
}

impl Default for Deferral {
    /// A 10ms delay.
    fn default() -> Self {
        Deferral::Delay(Duration::from_millis(10))
    }
}

impl From<Duration> for Deferral {
    fn from(delay: Duration) -> Self {
        Deferral::Delay(delay)
    }
}

impl fmt::Debug for Deferral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferral::Delay(d) => f.debug_tuple("Delay").field(d).finish(),
            Deferral::Until(_) => f.write_str("Until(..)"),
        }
    }
}
