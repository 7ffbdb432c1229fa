//! Error types used by the bounded wait helpers.
//!
//! The coordinator and notifier never fail: misuse such as a double
//! unsubscribe or releasing a token that is not held is a silent no-op.
//! The only fallible operations are the polling helpers in [`crate::wait`].
//!
//! - [`WaitError`] errors raised while waiting for a predicate or a deferral.
//!
//! Like every error in this crate it exposes `as_label` for logs/metrics.

use thiserror::Error;

/// # Errors produced by the bounded wait helpers.
///
/// There is no partial result: a failed wait only reports how far it got.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WaitError {
    /// The predicate never held within the retry budget.
    #[error("gave up after {checks} checks")]
    Exhausted {
        /// Number of times the predicate was evaluated.
        checks: u32,
    },

    /// The wait was cancelled before the predicate held.
    #[error("wait cancelled")]
    Cancelled,
}

impl WaitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use totem::WaitError;
    ///
    /// let err = WaitError::Exhausted { checks: 1001 };
    /// assert_eq!(err.as_label(), "wait_exhausted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WaitError::Exhausted { .. } => "wait_exhausted",
            WaitError::Cancelled => "wait_cancelled",
        }
    }

    /// Indicates whether the wait ran out of budget (as opposed to being cancelled).
    pub fn is_exhausted(&self) -> bool {
        matches!(self, WaitError::Exhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(WaitError::Exhausted { checks: 3 }.as_label(), "wait_exhausted");
        assert_eq!(WaitError::Cancelled.as_label(), "wait_cancelled");
    }

    #[test]
    fn display_reports_checks() {
        let err = WaitError::Exhausted { checks: 7 };
        assert_eq!(err.to_string(), "gave up after 7 checks");
        assert!(err.is_exhausted());
        assert!(!WaitError::Cancelled.is_exhausted());
    }
}
