//! HTTP layer
//!
//! Requests are built by an [`HttpProvider`], sent once by
//! [`RequestBuilder::send`], and turned into typed results or errors by
//! [`Response`]. Retrying is not done here; throttled operations wrap the
//! whole request in the retry controller instead.

pub use connector_provider::{ConnectorHttpProvider, ConnectorHttpProviderBuilder};
pub use path::encode_segment;
pub use provider::HttpProvider;
pub use request::RequestBuilder;
pub use response::{RawResponse, Response};

mod connector_provider;
mod path;
pub mod provider;
mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

/// Parse a header pair given as text.
pub(crate) fn parse_header(name: &str, value: &str) -> crate::Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::try_from(name)
        .map_err(|_| crate::Error::InvalidHeaderName(name.to_string()))?;
    let header_value = HeaderValue::try_from(value)
        .map_err(|_| crate::Error::InvalidHeaderValue(value.to_string()))?;
    Ok((header_name, header_value))
}
