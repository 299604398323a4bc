//! Error types for the Bot Connector client
//!
//! HTTP failures map onto one variant per status family. A 429 becomes
//! [`Error::Throttled`], which is the only variant the throttle retry
//! policy acts on.

use botconnector_core::retry::{Cancelled, Throttle, ThrottleSignal};
use botconnector_schema::SchemaError;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Bot Connector client.
#[derive(Debug, Error)]
pub enum Error {
    /// The service rejected the request (400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the service
        message: String,
        /// Error code from the service, if it sent one
        code: Option<String>,
    },

    /// The bearer token was missing or rejected (401).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The bot may not perform this operation (403).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Conversation, activity, member or team not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The service is throttling the caller (429).
    #[error("Throttled by service (retry after {retry_after:?})")]
    Throttled {
        /// Delay requested through the `Retry-After` header
        retry_after: Option<Duration>,
        /// Request id, for correlating with service logs
        request_id: Option<String>,
    },

    /// The service failed (5xx).
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    /// Any other unsuccessful status.
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Error code from the service, if it sent one
        code: Option<String>,
        /// Request id, for correlating with service logs
        request_id: Option<String>,
    },

    /// A caller supplied argument was missing or empty. Raised before any request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to deserialize a response body.
    #[error("Failed to parse response: {0}")]
    ResponseValidation(String),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid service URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel data did not have the expected shape.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// A retry loop was cancelled before the operation succeeded.
    #[error("Operation cancelled")]
    Cancelled,

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an error from an unsuccessful HTTP status and body.
    ///
    /// The Bot Framework error body `{"error": {"code", "message"}}` is used
    /// when present; otherwise the raw body becomes the message.
    pub fn from_response(status: u16, body: &str, headers: &http::HeaderMap) -> Self {
        let (message, code) = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse { error }) => (
                error.message.unwrap_or_else(|| body.to_string()),
                error.code,
            ),
            Err(_) => (body.to_string(), None),
        };
        let request_id = header_str(headers, "x-ms-request-id")
            .or_else(|| header_str(headers, "x-request-id"));

        match status {
            400 => Error::BadRequest { message, code },
            401 => Error::Authentication(message),
            403 => Error::PermissionDenied(message),
            404 => Error::NotFound(message),
            409 => Error::Conflict(message),
            429 => Error::Throttled {
                retry_after: parse_retry_after(headers),
                request_id,
            },
            s if s >= 500 => Error::InternalServerError(message),
            _ => Error::ApiError {
                status,
                message,
                code,
                request_id,
            },
        }
    }

    /// Whether this error means the caller is being throttled.
    pub fn is_throttled(&self) -> bool {
        matches!(self, Error::Throttled { .. })
    }

    /// Delay requested by the service, if this is a throttling error that carried one.
    pub fn retry_after(&self) -> Option<Duration> {
        if let Error::Throttled { retry_after, .. } = self {
            *retry_after
        } else {
            None
        }
    }
}

impl ThrottleSignal for Error {
    fn throttle(&self) -> Option<Throttle> {
        match self {
            Error::Throttled { retry_after, .. } => Some(Throttle {
                retry_after: *retry_after,
            }),
            _ => None,
        }
    }
}

impl From<Cancelled> for Error {
    fn from(_: Cancelled) -> Self {
        Error::Cancelled
    }
}

#[derive(Debug, serde::Deserialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorDetails {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn header_str(headers: &http::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Parse `Retry-After` as delta-seconds or an HTTP-date.
///
/// A date in the past yields a zero delay.
fn parse_retry_after(headers: &http::HeaderMap) -> Option<Duration> {
    let value = headers.get(http::header::RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let at = chrono::DateTime::parse_from_rfc2822(value).ok()?;
    let delta = at.with_timezone(&chrono::Utc) - chrono::Utc::now();
    Some(delta.to_std().unwrap_or(Duration::ZERO))
}
