//! The per-attempt retry decision.

use std::time::Duration;

/// Outcome of asking a [`RetryPolicy`](super::RetryPolicy) what to do after a failure.
///
/// A decision is built fresh for every failed attempt and is never mutated
/// afterwards. The requested delay is clamped to [`RetryDecision::MAX_DELAY`]
/// when the decision is constructed, whichever policy produced it, so a
/// server asking for an unbounded wait can never stall the caller for longer
/// than that bound.
///
/// # Examples
///
/// ```rust
/// use botconnector_core::retry::RetryDecision;
/// use std::time::Duration;
///
/// let decision = RetryDecision::retry_after(Duration::from_secs(30));
/// assert!(decision.should_retry());
/// assert_eq!(decision.delay(), RetryDecision::MAX_DELAY);
///
/// let stop = RetryDecision::stop();
/// assert!(!stop.should_retry());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryDecision {
    should_retry: bool,
    retry_after: Duration,
}

impl RetryDecision {
    /// Upper bound for any retry delay.
    pub const MAX_DELAY: Duration = Duration::from_secs(10);

    /// Retry after `delay`, clamped to [`Self::MAX_DELAY`].
    pub fn retry_after(delay: Duration) -> Self {
        Self {
            should_retry: true,
            retry_after: delay.min(Self::MAX_DELAY),
        }
    }

    /// Retry immediately.
    pub fn retry_now() -> Self {
        Self::retry_after(Duration::ZERO)
    }

    /// Stop retrying. The failure that produced this decision is returned to the caller.
    pub fn stop() -> Self {
        Self {
            should_retry: false,
            retry_after: Duration::ZERO,
        }
    }

    /// Whether the operation should be attempted again.
    pub fn should_retry(&self) -> bool {
        self.should_retry
    }

    /// How long to wait before the next attempt.
    ///
    /// Always zero for a terminal decision.
    pub fn delay(&self) -> Duration {
        self.retry_after
    }
}
