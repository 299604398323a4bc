#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Retry primitives for the botconnector SDK.
//!
//! Every call the SDK makes to a Bot Framework service can be wrapped in a
//! retry loop. This crate holds the pieces of that loop, independent of
//! HTTP:
//!
//! - [`RetryDecision`](retry::RetryDecision), clamped to a 10 second ceiling
//! - pluggable [`RetryPolicy`](retry::RetryPolicy) implementations
//! - [`run_with_retry`](retry::run_with_retry) and its cancellable variant
//!
//! Enable the `tracing` feature to get a warning event for every retry.
//!
//! # Examples
//!
//! ```rust
//! use botconnector_core::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), std::io::Error> {
//! let policy = ExponentialBackOff::builder()
//!     .max_retries(3)
//!     .initial_delay(Duration::from_millis(100))
//!     .build();
//!
//! let _value = run_with_retry(|| async { Ok::<_, std::io::Error>(42) }, &policy).await?;
//! # Ok(())
//! # }
//! ```

pub mod retry;

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use botconnector_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::retry::{
        Cancelled, DefaultBackOff, ExponentialBackOff, RetryDecision, RetryPolicy, Throttle,
        ThrottlePolicy, ThrottleSignal, default_back_off, run_with_retry,
        run_with_retry_cancellable,
    };
}
