//! Exponential back-off with jitter.

use super::decision::RetryDecision;
use super::policy::RetryPolicy;
use std::time::Duration;

/// Exponential back-off policy with configurable jitter.
///
/// Delays grow as `initial_delay * multiplier^attempt`. Jitter spreads each
/// delay by up to `±jitter` of its value. The result is then clamped to
/// [`RetryDecision::MAX_DELAY`] like every other decision.
///
/// Retries every failure kind. Wrap it in a closure to filter failures:
///
/// ```rust
/// use botconnector_core::retry::{ExponentialBackOff, RetryDecision, RetryPolicy};
/// use std::time::Duration;
///
/// let backoff = ExponentialBackOff::builder()
///     .max_retries(5)
///     .initial_delay(Duration::from_millis(100))
///     .jitter(0.0)
///     .build();
///
/// let network_only = move |err: &std::io::Error, attempt: u32| {
///     if err.kind() == std::io::ErrorKind::ConnectionReset {
///         backoff.decide(err, attempt)
///     } else {
///         RetryDecision::stop()
///     }
/// };
///
/// let reset = std::io::Error::from(std::io::ErrorKind::ConnectionReset);
/// assert_eq!(network_only.decide(&reset, 1).delay(), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackOff {
    max_retries: u32,
    initial_delay: Duration,
    multiplier: f64,
    jitter: f64,
}

impl ExponentialBackOff {
    /// Create a new builder for configuring exponential back-off.
    pub fn builder() -> ExponentialBackOffBuilder {
        ExponentialBackOffBuilder::default()
    }

    /// The delay before the retry following failure number `attempt`, before clamping.
    pub fn raw_delay(&self, attempt: u32) -> Duration {
        let initial = self.initial_delay.as_secs_f64();
        if initial == 0.0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let base = initial * self.multiplier.powi(exponent);

        let jittered = if self.jitter > 0.0 {
            // [base * (1 - jitter), base * (1 + jitter)]
            base + base * self.jitter * (rand::random::<f64>() - 0.5) * 2.0
        } else {
            base
        };

        // Overflowed or undefined growth saturates; `from_secs_f64` panics on both.
        if !jittered.is_finite() {
            return RetryDecision::MAX_DELAY;
        }
        Duration::from_secs_f64(jittered.clamp(0.0, RetryDecision::MAX_DELAY.as_secs_f64()))
    }

    /// The decision for the given attempt count, independent of the failure.
    pub fn decision(&self, attempt: u32) -> RetryDecision {
        if attempt < self.max_retries {
            RetryDecision::retry_after(self.raw_delay(attempt))
        } else {
            RetryDecision::stop()
        }
    }
}

impl Default for ExponentialBackOff {
    /// Defaults: 3 retries, 100ms initial delay, doubling, 10% jitter.
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            multiplier: 2.0,
            jitter: 0.1,
        }
    }
}

impl<E: ?Sized> RetryPolicy<E> for ExponentialBackOff {
    fn decide(&self, _error: &E, attempt: u32) -> RetryDecision {
        self.decision(attempt)
    }
}

/// Builder for [`ExponentialBackOff`].
#[derive(Debug, Default)]
pub struct ExponentialBackOffBuilder {
    max_retries: Option<u32>,
    initial_delay: Option<Duration>,
    multiplier: Option<f64>,
    jitter: Option<f64>,
}

impl ExponentialBackOffBuilder {
    /// Maximum number of retries after the initial attempt. Default: 3
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Delay before the first retry. Default: 100ms
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Growth factor between consecutive delays. Default: 2.0
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    /// Jitter factor, clamped to `0.0..=1.0`. Default: 0.1
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = Some(jitter.clamp(0.0, 1.0));
        self
    }

    /// Build the policy, using defaults for unset values.
    pub fn build(self) -> ExponentialBackOff {
        let defaults = ExponentialBackOff::default();
        ExponentialBackOff {
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            initial_delay: self.initial_delay.unwrap_or(defaults.initial_delay),
            multiplier: self.multiplier.unwrap_or(defaults.multiplier),
            jitter: self.jitter.unwrap_or(defaults.jitter),
        }
    }
}
