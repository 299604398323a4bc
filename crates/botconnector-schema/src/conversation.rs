//! Conversation level request and response bodies

use crate::account::{ChannelAccount, ConversationAccount, TeamsChannelAccount};
use crate::activity::Activity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Enough information to address an existing conversation later
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReference {
    /// Id of the activity being referenced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,

    /// User in the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ChannelAccount>,

    /// Bot in the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<ChannelAccount>,

    /// The conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,

    /// Channel id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    /// Locale of the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Connector endpoint for the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
}

/// Body of a create-conversation request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationParameters {
    /// Whether this is a group conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,

    /// The bot creating the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<ChannelAccount>,

    /// Members to add
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<ChannelAccount>,

    /// Topic of the conversation, where the channel supports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,

    /// Initial activity to post
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,

    /// Channel specific payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<Value>,

    /// Tenant to create the conversation in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Response of a create-conversation request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResourceResponse {
    /// Id of the initial activity, if one was sent
    #[serde(default)]
    pub activity_id: Option<String>,

    /// Service endpoint for the new conversation
    #[serde(default)]
    pub service_url: Option<String>,

    /// Id of the new conversation
    #[serde(default)]
    pub id: Option<String>,
}

/// A conversation and its members
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMembers {
    /// Conversation id
    #[serde(default)]
    pub id: Option<String>,

    /// Members of the conversation
    #[serde(default)]
    pub members: Vec<ChannelAccount>,
}

/// One page of conversations the bot takes part in
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationsResult {
    /// Token for the next page, absent on the last page
    #[serde(default)]
    pub continuation_token: Option<String>,

    /// Conversations on this page
    #[serde(default)]
    pub conversations: Vec<ConversationMembers>,
}

/// Id of a resource the service created
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    /// Resource id
    #[serde(default)]
    pub id: Option<String>,
}

/// One page of conversation members
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedMembersResult {
    /// Token for the next page, absent on the last page
    #[serde(default)]
    pub continuation_token: Option<String>,

    /// Members on this page
    #[serde(default)]
    pub members: Vec<ChannelAccount>,
}

/// One page of Teams conversation members
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamsPagedMembersResult {
    /// Token for the next page, absent on the last page
    #[serde(default)]
    pub continuation_token: Option<String>,

    /// Members on this page
    #[serde(default)]
    pub members: Vec<TeamsChannelAccount>,
}

/// A batch of historic activities to import into a conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    /// Activities, oldest first
    #[serde(default)]
    pub activities: Vec<Activity>,
}
