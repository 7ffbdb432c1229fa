//! # Polling policy for bounded waits.
//!
//! [`PollPolicy`] controls how long [`wait_until`](crate::wait_until) sleeps between
//! two checks of its predicate and how many sleeps it tolerates before giving up.
//! It is parameterized by:
//! - [`PollPolicy::interval`] the delay before the first re-check;
//! - [`PollPolicy::factor`] the multiplicative growth factor;
//! - [`PollPolicy::max`] the maximum delay cap;
//! - [`PollPolicy::budget`] how many sleeps are allowed.
//!
//! The delay after failed check `n` (0-indexed) is `interval × factor^n`, clamped to `max`.
//! The default is a fixed 500ms delay with a budget of 1000, so a never-true
//! predicate is evaluated 1001 times before the wait fails.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use totem::PollPolicy;
//!
//! let poll = PollPolicy {
//!     interval: Duration::from_millis(50),
//!     factor: 2.0,
//!     max: Duration::from_millis(300),
//!     budget: 10,
//! };
//!
//! assert_eq!(poll.delay(0), Duration::from_millis(50));
//! assert_eq!(poll.delay(2), Duration::from_millis(200));
//! assert_eq!(poll.delay(5), Duration::from_millis(300));
//! ```

use std::time::Duration;

/// Fixed-budget polling policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PollPolicy {
    /// Delay after the first failed check.
    pub interval: Duration,
    /// Multiplicative growth factor (`1.0` = constant delay).
    pub factor: f64,
    /// Maximum delay cap.
    pub max: Duration,
    /// Number of sleeps allowed before giving up.
    pub budget: u32,
}

impl Default for PollPolicy {
    /// Returns a policy with:
    /// - `interval = 500ms`;
    /// - `factor = 1.0` (constant delay);
    /// - `max = 500ms`;
    /// - `budget = 1000`.
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            factor: 1.0,
            max: Duration::from_millis(500),
            budget: 1000,
        }
    }
}

impl PollPolicy {
    /// Constant-delay policy with the given budget.
    pub fn fixed(interval: Duration, budget: u32) -> Self {
        Self {
            interval,
            factor: 1.0,
            max: interval,
            budget,
        }
    }

    /// Number of sleeps a wait may take; a zero budget counts as 1.
    #[inline]
    pub fn effective_budget(&self) -> u32 {
        self.budget.max(1)
    }

    /// Computes the delay after failed check `attempt` (0-indexed).
    ///
    /// Non-finite or negative intermediate values clamp to [`PollPolicy::max`].
    pub fn delay(&self, attempt: u32) -> Duration {
        let max_secs = self.max.as_secs_f64();
        let exp = attempt.min(i32::MAX as u32) as i32;
        let secs = self.interval.as_secs_f64() * self.factor.powi(exp);

        if !secs.is_finite() || secs < 0.0 || secs > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(secs)
        }
    }
}
