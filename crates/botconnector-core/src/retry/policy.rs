//! Retry policies: the pluggable decision functions consulted by the controller.

use super::decision::RetryDecision;
use std::time::Duration;

/// Decides whether a failed attempt should be retried, and after how long.
///
/// A policy is a pure function of the failure and the attempt counter. The
/// counter starts at `0` for the first failure and is incremented by the
/// controller before every retry. Policies own no mutable state, so one
/// policy value can be shared by any number of concurrent retry loops.
///
/// Any `Fn(&E, u32) -> RetryDecision` closure is a policy:
///
/// ```rust
/// use botconnector_core::retry::{RetryDecision, RetryPolicy};
/// use std::time::Duration;
///
/// let only_twice = |_err: &std::io::Error, attempt: u32| {
///     if attempt < 2 {
///         RetryDecision::retry_after(Duration::from_millis(5))
///     } else {
///         RetryDecision::stop()
///     }
/// };
///
/// let err = std::io::Error::other("boom");
/// assert!(only_twice.decide(&err, 1).should_retry());
/// assert!(!only_twice.decide(&err, 2).should_retry());
/// ```
pub trait RetryPolicy<E: ?Sized>: Send + Sync {
    /// Produce the decision for `error`, observed on attempt number `attempt`.
    fn decide(&self, error: &E, attempt: u32) -> RetryDecision;
}

impl<E, F> RetryPolicy<E> for F
where
    E: ?Sized,
    F: Fn(&E, u32) -> RetryDecision + Send + Sync,
{
    fn decide(&self, error: &E, attempt: u32) -> RetryDecision {
        self(error, attempt)
    }
}

/// Flat back-off: a fixed delay for a bounded number of retries.
///
/// Retries every failure, regardless of its kind, `max_retries` times with
/// the same `back_off` delay in between. The delay does not grow; use
/// [`ExponentialBackOff`](super::ExponentialBackOff) for that.
///
/// # Examples
///
/// ```rust
/// use botconnector_core::retry::DefaultBackOff;
/// use std::time::Duration;
///
/// let policy = DefaultBackOff::default();
/// assert_eq!(policy.decision(9).delay(), Duration::from_millis(50));
/// assert!(!policy.decision(10).should_retry());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultBackOff {
    max_retries: u32,
    back_off: Duration,
}

impl DefaultBackOff {
    /// Default number of retries after the initial attempt.
    pub const MAX_RETRIES: u32 = 10;

    /// Default delay between attempts.
    pub const DEFAULT_BACK_OFF: Duration = Duration::from_millis(50);

    /// Create a flat back-off with explicit bounds.
    pub fn new(max_retries: u32, back_off: Duration) -> Self {
        Self {
            max_retries,
            back_off,
        }
    }

    /// Number of retries this policy allows.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay between attempts.
    pub fn back_off(&self) -> Duration {
        self.back_off
    }

    /// The decision for the given attempt count, independent of the failure.
    pub fn decision(&self, attempt: u32) -> RetryDecision {
        if attempt < self.max_retries {
            RetryDecision::retry_after(self.back_off)
        } else {
            RetryDecision::stop()
        }
    }
}

impl Default for DefaultBackOff {
    fn default() -> Self {
        Self::new(Self::MAX_RETRIES, Self::DEFAULT_BACK_OFF)
    }
}

impl<E: ?Sized> RetryPolicy<E> for DefaultBackOff {
    fn decide(&self, _error: &E, attempt: u32) -> RetryDecision {
        self.decision(attempt)
    }
}

/// `default_back_off(attempt)` with the default bounds (10 retries, 50ms).
pub fn default_back_off(attempt: u32) -> RetryDecision {
    DefaultBackOff::default().decision(attempt)
}

/// A throttling signal extracted from a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Throttle {
    /// Delay suggested by the server, if it sent one.
    pub retry_after: Option<Duration>,
}

impl Throttle {
    /// A throttle signal carrying a server-suggested delay.
    pub fn after(delay: Duration) -> Self {
        Self {
            retry_after: Some(delay),
        }
    }
}

/// Failures that can report whether they are a throttling signal.
pub trait ThrottleSignal {
    /// `Some` when this failure means the caller is being throttled.
    fn throttle(&self) -> Option<Throttle>;
}

/// Retries throttled failures only.
///
/// - throttled with a suggested delay: retry after that delay (still clamped
///   to [`RetryDecision::MAX_DELAY`]);
/// - throttled without one: defer to the flat [`DefaultBackOff`];
/// - anything else: stop at once.
///
/// The suggested delay is honoured on every attempt; the attempt bound of
/// the fallback only applies when the server does not send a delay. A server
/// that keeps answering with a zero delay (`Retry-After: 0`, or a date in the
/// past) is therefore retried back to back until the caller cancels. Set
/// [`with_retry_after_limit`](Self::with_retry_after_limit) to bound that
/// case as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrottlePolicy {
    fallback: DefaultBackOff,
    retry_after_limit: Option<u32>,
}

impl ThrottlePolicy {
    /// Use `fallback` when a throttle signal carries no delay.
    pub fn new(fallback: DefaultBackOff) -> Self {
        Self {
            fallback,
            retry_after_limit: None,
        }
    }

    /// Stop once `attempt` reaches `limit`, even when the server suggests a
    /// delay.
    pub fn with_retry_after_limit(mut self, limit: u32) -> Self {
        self.retry_after_limit = Some(limit);
        self
    }

    /// The fallback back-off.
    pub fn fallback(&self) -> DefaultBackOff {
        self.fallback
    }

    /// The bound on retries that follow a server suggested delay, if any.
    pub fn retry_after_limit(&self) -> Option<u32> {
        self.retry_after_limit
    }
}

impl<E> RetryPolicy<E> for ThrottlePolicy
where
    E: ThrottleSignal + ?Sized,
{
    fn decide(&self, error: &E, attempt: u32) -> RetryDecision {
        match error.throttle() {
            Some(Throttle {
                retry_after: Some(_),
            }) if self.retry_after_limit.is_some_and(|limit| attempt >= limit) => {
                RetryDecision::stop()
            }
            Some(Throttle {
                retry_after: Some(delay),
            }) => RetryDecision::retry_after(delay),
            Some(Throttle { retry_after: None }) => self.fallback.decision(attempt),
            None => RetryDecision::stop(),
        }
    }
}
