//! Channel and conversation accounts
//!
//! Accounts identify users, bots and conversations on a channel. Channels
//! attach extra properties freely, so every account keeps unknown fields in
//! a flattened `properties` map and round-trips them unchanged.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user or bot on a channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    /// Channel id for the user or bot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display friendly name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Azure Active Directory object id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aad_object_id: Option<String>,

    /// Role of the entity behind the account (`user` or `bot`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Channel specific properties
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ChannelAccount {
    /// Create an account with the given id and display name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A conversation on a channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    /// Whether the conversation has more than two participants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,

    /// Channel specific conversation type (`personal`, `groupChat`, `channel`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_type: Option<String>,

    /// Conversation id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display friendly name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Azure Active Directory object id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aad_object_id: Option<String>,

    /// Role of the entity behind the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Tenant the conversation belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Channel specific properties
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ConversationAccount {
    /// Create a conversation account with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }
}

/// A Teams user, with the directory fields Teams adds to a [`ChannelAccount`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamsChannelAccount {
    /// Channel id for the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display friendly name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Azure Active Directory object id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aad_object_id: Option<String>,

    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// Surname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Unique user principal name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,

    /// Tenant id of the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// User role (`user`, `guest`, `anonymous`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,

    /// Remaining properties
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl TryFrom<ChannelAccount> for TeamsChannelAccount {
    type Error = crate::error::SchemaError;

    /// Re-read a generic account as a Teams account.
    ///
    /// Directory fields the service sent as extension data end up in their
    /// typed slots; anything still unknown stays in `properties`.
    fn try_from(account: ChannelAccount) -> Result<Self> {
        Ok(serde_json::from_value(serde_json::to_value(account)?)?)
    }
}
