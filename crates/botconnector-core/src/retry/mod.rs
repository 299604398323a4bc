//! Retry decisions, back-off policies and the retry loop.
//!
//! # Key Types
//!
//! - [`RetryDecision`] - what to do after one failed attempt
//! - [`RetryPolicy`] - maps a failure and an attempt count to a decision
//! - [`DefaultBackOff`] - flat back-off, 10 retries 50ms apart
//! - [`ThrottlePolicy`] - retries only failures that signal throttling
//! - [`ExponentialBackOff`] - growing delays with jitter
//!
//! # Examples
//!
//! ```rust
//! use botconnector_core::retry::{run_with_retry, DefaultBackOff};
//!
//! # async fn example() -> Result<(), std::io::Error> {
//! let value = run_with_retry(
//!     || async { Ok::<_, std::io::Error>(42) },
//!     &DefaultBackOff::default(),
//! )
//! .await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

mod controller;
mod decision;
mod exponential;
mod policy;

pub use controller::{Cancelled, run_with_retry, run_with_retry_cancellable};
pub use decision::RetryDecision;
pub use exponential::{ExponentialBackOff, ExponentialBackOffBuilder};
pub use policy::{
    DefaultBackOff, RetryPolicy, Throttle, ThrottlePolicy, ThrottleSignal, default_back_off,
};
