//! The retry loop.

use super::policy::RetryPolicy;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Returned when a retry loop is cancelled while waiting to retry.
///
/// Error types used with [`run_with_retry_cancellable`] convert from this
/// so the cancellation can be surfaced through the caller's own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled while waiting to retry")]
pub struct Cancelled;

/// Run `operation` until it succeeds or `policy` declines to retry.
///
/// The first failure is reported to the policy with attempt `0`. When the
/// policy says stop, the failure is returned exactly as the operation
/// produced it. The controller itself puts no cap on the number of
/// attempts; that bound belongs to the policy.
///
/// # Examples
///
/// ```rust
/// use botconnector_core::retry::{run_with_retry, DefaultBackOff};
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// # async fn example() {
/// let calls = AtomicU32::new(0);
/// let result = run_with_retry(
///     || async {
///         if calls.fetch_add(1, Ordering::SeqCst) < 2 {
///             Err(std::io::Error::other("transient"))
///         } else {
///             Ok("done")
///         }
///     },
///     &DefaultBackOff::default(),
/// )
/// .await;
///
/// assert_eq!(result.unwrap(), "done");
/// assert_eq!(calls.load(Ordering::SeqCst), 3);
/// # }
/// ```
pub async fn run_with_retry<F, Fut, T, E, P>(mut operation: F, policy: &P) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: RetryPolicy<E> + ?Sized,
{
    let mut attempt = 0u32;
    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        let decision = policy.decide(&error, attempt);
        if !decision.should_retry() {
            return Err(error);
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            attempt,
            delay_ms = decision.delay().as_millis() as u64,
            "operation failed, retrying"
        );

        tokio::time::sleep(decision.delay()).await;
        attempt += 1;
    }
}

/// Like [`run_with_retry`], but abandons the loop when `cancel` fires.
///
/// The token is checked before every attempt and raced against every
/// back-off wait. Once it is cancelled the operation is not invoked again
/// and [`Cancelled`] is returned through `E`. An attempt already in flight
/// is left to complete; its failure is still reported unchanged when the
/// policy declines to retry it.
pub async fn run_with_retry_cancellable<F, Fut, T, E, P>(
    mut operation: F,
    policy: &P,
    cancel: &CancellationToken,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<Cancelled>,
    P: RetryPolicy<E> + ?Sized,
{
    let mut attempt = 0u32;
    loop {
        if cancel.is_cancelled() {
            return Err(Cancelled.into());
        }

        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        let decision = policy.decide(&error, attempt);
        if !decision.should_retry() {
            return Err(error);
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            attempt,
            delay_ms = decision.delay().as_millis() as u64,
            "operation failed, retrying"
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::debug!(attempt, "retry loop cancelled during back-off");
                return Err(Cancelled.into());
            }
            _ = tokio::time::sleep(decision.delay()) => {}
        }
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::{DefaultBackOff, RetryDecision, Throttle, ThrottlePolicy, ThrottleSignal};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[derive(Debug, PartialEq, Eq)]
    enum TestError {
        Transient(u32),
        Throttled(Option<Duration>),
        Fatal,
        Cancelled,
    }

    impl From<Cancelled> for TestError {
        fn from(_: Cancelled) -> Self {
            TestError::Cancelled
        }
    }

    impl ThrottleSignal for TestError {
        fn throttle(&self) -> Option<Throttle> {
            match self {
                TestError::Throttled(retry_after) => Some(Throttle {
                    retry_after: *retry_after,
                }),
                _ => None,
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success_runs_once() {
        let calls = AtomicU32::new(0);
        let result = run_with_retry(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TestError>(42)
            },
            &DefaultBackOff::default(),
        )
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fails_twice_then_succeeds() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result = run_with_retry(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(TestError::Transient(n))
                } else {
                    Ok("ok")
                }
            },
            &DefaultBackOff::default(),
        )
        .await;

        assert_eq!(result, Ok("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_attempts_eleven_times() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = run_with_retry(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err(TestError::Transient(n))
            },
            &DefaultBackOff::default(),
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 11);
        // The final failure is propagated unchanged.
        assert_eq!(result, Err(TestError::Transient(10)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_policy_sees_increasing_attempts() {
        let seen = std::sync::Mutex::new(Vec::new());
        let policy = |_: &TestError, attempt: u32| {
            seen.lock().unwrap().push(attempt);
            if attempt < 3 {
                RetryDecision::retry_now()
            } else {
                RetryDecision::stop()
            }
        };

        let result: Result<(), _> =
            run_with_retry(|| async { Err(TestError::Fatal) }, &policy).await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_policy_does_not_retry_other_failures() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = run_with_retry(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TestError::Fatal)
            },
            &ThrottlePolicy::default(),
        )
        .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_policy_waits_clamped_server_delay() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result = run_with_retry(
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(TestError::Throttled(Some(Duration::from_secs(20))))
                } else {
                    Ok(())
                }
            },
            &ThrottlePolicy::default(),
        )
        .await;

        assert_eq!(result, Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_back_off_stops_loop() {
        let calls = Arc::new(AtomicU32::new(0));
        let token = CancellationToken::new();
        let policy = |_: &TestError, _: u32| RetryDecision::retry_after(Duration::from_secs(5));

        let task = {
            let calls = Arc::clone(&calls);
            let token = token.clone();
            tokio::spawn(async move {
                run_with_retry_cancellable(
                    || {
                        let calls = Arc::clone(&calls);
                        async move {
                            let n = calls.fetch_add(1, Ordering::SeqCst);
                            Err::<(), _>(TestError::Transient(n))
                        }
                    },
                    &policy,
                    &token,
                )
                .await
            })
        };

        // Let the first attempt fail and the back-off begin.
        tokio::time::sleep(Duration::from_secs(1)).await;
        token.cancel();

        let result = task.await.unwrap();
        assert_eq!(result, Err(TestError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_never_invokes_operation() {
        let calls = AtomicU32::new(0);
        let token = CancellationToken::new();
        token.cancel();

        let result = run_with_retry_cancellable(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TestError>(())
            },
            &DefaultBackOff::default(),
            &token,
        )
        .await;

        assert_eq!(result, Err(TestError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellable_without_cancel_behaves_like_plain_loop() {
        let calls = AtomicU32::new(0);
        let token = CancellationToken::new();

        let result = run_with_retry_cancellable(
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 1 {
                    Err(TestError::Throttled(None))
                } else {
                    Ok(7)
                }
            },
            &ThrottlePolicy::default(),
            &token,
        )
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
