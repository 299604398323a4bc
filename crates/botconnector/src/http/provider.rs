//! HTTP provider trait
//!
//! The [`HttpProvider`] seam lets tests and alternative transports stand in
//! for the connector endpoint while resources keep a single code path.

use crate::{
    error::Result,
    http::{Method, RequestBuilder},
};
use std::fmt;

/// Provider of requests against a connector endpoint.
///
/// Implementations own authentication and URL construction. The returned
/// builder makes exactly one attempt when sent; retrying is the caller's
/// concern.
pub trait HttpProvider: Send + Sync + fmt::Debug {
    /// Create a `RequestBuilder` for a path relative to the service URL
    /// (e.g. `v3/conversations`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be constructed.
    fn create_request(&self, method: Method, path: &str) -> Result<RequestBuilder>;

    /// Get the provider name for debugging/logging.
    fn provider_name(&self) -> &'static str;

    /// Get the base URL for this provider.
    fn base_url(&self) -> &str;

    /// Cast to `std::any::Any` for downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
