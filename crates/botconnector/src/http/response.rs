//! HTTP response handling

use crate::error::{Error, Result};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    elapsed: Duration,
}

/// A parsed body together with the HTTP metadata it arrived with.
#[derive(Debug, Clone)]
pub struct RawResponse<T> {
    parsed: T,
    status: StatusCode,
    headers: HeaderMap,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            elapsed: Duration::ZERO,
        }
    }

    /// Record how long the request took.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Time taken by the request.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the body as a string.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| Error::ResponseValidation(e.to_string()))
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::ResponseValidation(e.to_string()))
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response is an error (4xx or 5xx status).
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Turn an unsuccessful status into the matching [`Error`].
    pub fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let body = String::from_utf8_lossy(&self.body);
        Err(Error::from_response(
            self.status.as_u16(),
            &body,
            &self.headers,
        ))
    }

    /// Parse a successful response, converting HTTP errors to client errors.
    pub fn parse_result<T: DeserializeOwned>(self) -> Result<T> {
        self.ensure_success()?.json()
    }

    /// Like [`parse_result`](Self::parse_result), but `202`, `204` and an
    /// empty body yield `None`.
    pub fn parse_optional<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let response = self.ensure_success()?;
        if matches!(
            response.status,
            StatusCode::ACCEPTED | StatusCode::NO_CONTENT
        ) || response.body.iter().all(u8::is_ascii_whitespace)
        {
            return Ok(None);
        }
        response.json().map(Some)
    }

    /// Return the body of a successful response as bytes.
    pub fn bytes_result(self) -> Result<Bytes> {
        Ok(self.ensure_success()?.body)
    }

    /// Parse a successful response into a [`RawResponse`].
    pub fn into_parsed_raw<T: DeserializeOwned>(self) -> Result<RawResponse<T>> {
        let response = self.ensure_success()?;
        let parsed = response.json()?;
        Ok(RawResponse::new(parsed, response.status, response.headers))
    }
}

impl<T> RawResponse<T> {
    /// Create a new raw response.
    pub fn new(parsed: T, status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            parsed,
            status,
            headers,
        }
    }

    /// Get a reference to the parsed response body.
    pub fn parsed(&self) -> &T {
        &self.parsed
    }

    /// Consume this raw response and return the parsed body.
    pub fn into_parsed(self) -> T {
        self.parsed
    }

    /// Get the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get a reference to the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Service request id, from `x-ms-request-id`.
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-ms-request-id")
            .and_then(|v| v.to_str().ok())
    }
}
