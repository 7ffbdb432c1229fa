//! # Crate-wide configuration.
//!
//! Provides [`Config`], the centralized settings shared by the coordinator,
//! the notifiers it builds and the timing helpers.
//!
//! Config is used in three ways:
//! 1. **Coordinator creation**: `Totem::with_config(&config)`
//! 2. **Timing helpers**: `wait_until(pred, &config.poll)`, `later(config.defer_delay)`
//! 3. **Host bindings**: `FocusHandle`, `KeyBinding` read their delays here; `VisibleSet`,
//!    `MediaBinding` and `RefState` take threshold and delivery via `with_config`
//!
//! ## Sentinel values
//! - `poll.budget = 0` → treated as 1 (at least one retry)
//! - `visibility_threshold = 0.0` (or non-finite) → default threshold 0.75

use std::time::Duration;

use crate::notify::Delivery;
use crate::policies::PollPolicy;

/// Threshold used when none (or zero) is configured.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.75;

/// Global configuration.
///
/// ## Field semantics
/// - `delivery`: what a broadcast does when a subscriber panics
/// - `defer_delay`: delay used to run work "after the current UI update cycle"
/// - `poll`: fixed-delay polling policy for bounded waits
/// - `debounce`: default quiet period for [`Debouncer`](crate::Debouncer)
/// - `visibility_threshold`: intersection ratio above which a target counts as visible
///
/// ## Notes
/// All fields are public. Prefer the accessors to avoid sprinkling sentinel checks.
#[derive(Clone, Debug)]
pub struct Config {
    /// Delivery policy of every notifier built from this config.
    pub delivery: Delivery,

    /// Delay before deferred work (focus, key actions) runs.
    pub defer_delay: Duration,

    /// Polling policy for [`wait_until`](crate::wait_until).
    pub poll: PollPolicy,

    /// Default debounce window.
    pub debounce: Duration,

    /// Intersection ratio required to count a target as visible (`0.0` = default).
    pub visibility_threshold: f64,
}

impl Config {
    /// Returns the polling budget clamped to a minimum of 1.
    #[inline]
    pub fn poll_budget(&self) -> u32 {
        self.poll.effective_budget()
    }

    /// Returns the visibility threshold, falling back to the default for `0.0`
    /// or non-finite values and clamping to `[0, 1]` otherwise.
    #[inline]
    pub fn visibility_threshold(&self) -> f64 {
        let t = self.visibility_threshold;
        if !t.is_finite() || t == 0.0 {
            DEFAULT_VISIBILITY_THRESHOLD
        } else {
            t.clamp(0.0, 1.0)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `delivery = Delivery::Propagate`
    /// - `defer_delay = 10ms`
    /// - `poll = PollPolicy::default()` (500ms, budget 1000)
    /// - `debounce = 250ms`
    /// - `visibility_threshold = 0.75`
    fn default() -> Self {
        Self {
            delivery: Delivery::default(),
            defer_delay: Duration::from_millis(10),
            poll: PollPolicy::default(),
            debounce: Duration::from_millis(250),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.delivery, Delivery::Propagate);
        assert_eq!(cfg.defer_delay, Duration::from_millis(10));
        assert_eq!(cfg.poll_budget(), 1000);
        assert_eq!(cfg.visibility_threshold(), 0.75);
    }

    #[test]
    fn sentinels() {
        let mut cfg = Config::default();
        cfg.poll.budget = 0;
        cfg.visibility_threshold = 0.0;
        assert_eq!(cfg.poll_budget(), 1);
        assert_eq!(cfg.visibility_threshold(), DEFAULT_VISIBILITY_THRESHOLD);

        cfg.visibility_threshold = f64::NAN;
        assert_eq!(cfg.visibility_threshold(), DEFAULT_VISIBILITY_THRESHOLD);

        cfg.visibility_threshold = 3.0;
        assert_eq!(cfg.visibility_threshold(), 1.0);

        cfg.visibility_threshold = 0.3;
        assert_eq!(cfg.visibility_threshold(), 0.3);
    }
}
