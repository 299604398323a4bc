//! Error types for schema conversions
//!
//! The schema types are plain data, so the only failures are conversions
//! between loosely typed channel data and the typed Teams structures.

use std::fmt;

/// Result type for schema conversions
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors that can occur while converting schema values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// JSON value did not match the expected shape
    SerializationError(String),

    /// Base64 payload could not be decoded
    InvalidBase64(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Self::InvalidBase64(msg) => write!(f, "Invalid base64 payload: {}", msg),
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<base64::DecodeError> for SchemaError {
    fn from(err: base64::DecodeError) -> Self {
        Self::InvalidBase64(err.to_string())
    }
}
