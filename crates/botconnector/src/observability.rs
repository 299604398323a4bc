//! Structured logging for connector traffic
//!
//! Each HTTP attempt is an [`Exchange`]: it logs when the request leaves and
//! once more when the response (or the transport failure) comes back. Each
//! public operation runs inside an [`operation_span`] carrying a fresh
//! invocation id, so the attempts of one retried call group together.

use http::{Method, StatusCode};
use std::time::{Duration, Instant};
use tracing::{Span, debug, info_span, warn};

/// One HTTP attempt against the connector, from send to last body byte.
#[derive(Debug)]
pub struct Exchange {
    method: Method,
    path: String,
    started: Instant,
}

impl Exchange {
    /// Log the outgoing request and start timing it.
    pub fn begin(method: &Method, path: &str, body_len: Option<usize>) -> Self {
        debug!(%method, path, body_len, "connector request");
        Self {
            method: method.clone(),
            path: path.to_string(),
            started: Instant::now(),
        }
    }

    /// Time since the request left.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log the response and return the exchange duration.
    ///
    /// Throttling is routine for batch traffic and stays at debug; other
    /// failures are warnings.
    pub fn finish(&self, status: StatusCode, body_len: usize) -> Duration {
        let elapsed = self.elapsed();
        let elapsed_ms = elapsed.as_millis() as u64;
        let (method, path) = (&self.method, self.path.as_str());

        if status.is_success() {
            debug!(
                %method,
                path,
                status = status.as_u16(),
                elapsed_ms,
                body_len,
                "connector response"
            );
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            debug!(%method, path, elapsed_ms, "connector throttled the request");
        } else {
            warn!(
                %method,
                path,
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or("unknown"),
                elapsed_ms,
                "connector request failed"
            );
        }
        elapsed
    }

    /// Log a request that never produced a response.
    pub fn abandon(&self, error: &dyn std::error::Error) {
        warn!(
            method = %self.method,
            path = %self.path,
            elapsed_ms = self.elapsed().as_millis() as u64,
            error = %error,
            "connector unreachable"
        );
    }
}

/// Span for one public operation, tagged with a random invocation id.
///
/// Retries of the same operation share the span, so their log lines carry
/// the same id.
pub fn operation_span(operation: &'static str) -> Span {
    info_span!(
        "connector_operation",
        operation,
        invocation_id = %uuid::Uuid::new_v4()
    )
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Does nothing if a global subscriber is already set.
#[cfg(feature = "trace")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
