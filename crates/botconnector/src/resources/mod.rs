//! API resource endpoints
//!
//! One handle per REST area, each reached through the [`Client`]:
//! [`Conversations`], [`Attachments`] and [`Teams`].

pub mod attachments;
pub mod conversations;
pub mod teams;

pub use attachments::Attachments;
pub use conversations::{Conversations, ConversationsRaw};
pub use teams::Teams;

use crate::client::Client;
use crate::error::{Error, Result};

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}

/// Reject an empty id before any request is made.
pub(crate) fn require<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{} is required.", name)));
    }
    Ok(value)
}
