//! # botconnector
//!
//! Async client for the Bot Framework Connector REST API and its Microsoft
//! Teams extensions:
//! - Conversations: create, post, reply, update, delete, list members
//! - Attachments: upload and download
//! - Teams: team and channel details, meeting participants, meeting
//!   notifications, and batch messaging
//! - [`TeamsInfo`], which fills ids in from the incoming activity
//!
//! Batch messaging is rate limited by the service. Those operations run
//! under a throttle-aware retry policy that honours `Retry-After`; all
//! other calls are made once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use botconnector::Client;
//! use botconnector::schema::Activity;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .service_url("https://smba.trafficmanager.net/amer/")
//!         .auth_token("eyJ...")
//!         .build()?;
//!
//!     let sent = client
//!         .conversations()
//!         .send_to_conversation("19:abc@thread.skype", &Activity::message("Hello"))
//!         .await?;
//!
//!     println!("{:?}", sent.id);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
pub use crate::http::RawResponse;
pub use teams_info::TeamsInfo;

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod teams_info;

/// Wire types, re-exported from `botconnector-schema`.
pub use botconnector_schema as schema;

/// Retry primitives, re-exported from `botconnector-core`.
pub use botconnector_core::retry;

/// Cancels the retry loop of a batch operation, see
/// [`Teams::with_cancellation`](resources::Teams::with_cancellation).
pub use tokio_util::sync::CancellationToken;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use botconnector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, Error, Result, TeamsInfo,
        schema::{Activity, ChannelAccount, ConversationParameters, TeamMember},
    };
}

/// SDK version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
