//! Timing policies.
//!
//! This module groups the knobs that control **how long** the helpers wait.
//!
//! ## Contents
//! - [`PollPolicy`] delay between predicate checks and the retry budget
//!
//! ## Quick wiring
//! ```text
//! Config { poll: PollPolicy, .. }
//!      └─► wait::wait_until(pred, &poll)
//!           - poll.delay(attempt) between checks
//!           - poll.budget sleeps before WaitError::Exhausted
//! ```

mod poll;

pub use poll::PollPolicy;
