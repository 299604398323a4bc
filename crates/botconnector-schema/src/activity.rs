//! The activity, the unit of communication between a bot and a channel

use crate::account::{ChannelAccount, ConversationAccount};
use crate::attachment::Attachment;
use crate::conversation::ConversationReference;
use crate::error::Result;
use crate::teams::{TeamInfo, TeamsChannelData};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known values of [`Activity::kind`]
pub mod activity_types {
    /// A message
    pub const MESSAGE: &str = "message";
    /// Conversation membership or metadata changed
    pub const CONVERSATION_UPDATE: &str = "conversationUpdate";
    /// A typing indicator
    pub const TYPING: &str = "typing";
    /// A reaction to an earlier activity
    pub const MESSAGE_REACTION: &str = "messageReaction";
    /// A named event
    pub const EVENT: &str = "event";
    /// A request that expects an invoke response
    pub const INVOKE: &str = "invoke";
    /// The end of a conversation
    pub const END_OF_CONVERSATION: &str = "endOfConversation";
}

/// An activity exchanged with a channel
///
/// Only the commonly used fields are typed; anything else the channel sends
/// is kept in `properties`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity type, see [`activity_types`]
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Id of this activity on the channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// When the message was sent, in UTC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// When the message was sent, in the sender's local time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_timestamp: Option<DateTime<FixedOffset>>,

    /// IANA name of the sender's time zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_timezone: Option<String>,

    /// Connector endpoint to reply to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,

    /// Channel id (`msteams`, `webchat`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    /// Sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,

    /// Conversation the activity belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,

    /// Recipient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,

    /// Format of `text` (`markdown`, `plain`, `xml`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_format: Option<String>,

    /// Layout hint for multiple attachments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_layout: Option<String>,

    /// Members added to the conversation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_added: Vec<ChannelAccount>,

    /// Members removed from the conversation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_removed: Vec<ChannelAccount>,

    /// Updated conversation topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,

    /// Locale of the content, as an IETF language tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Message text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Text to speak
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speak: Option<String>,

    /// Input hint for the client (`acceptingInput`, `expectingInput`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_hint: Option<String>,

    /// Text to show when the channel cannot render cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Suggested actions, kept as JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_actions: Option<Value>,

    /// Attachments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    /// Entities mentioned in the message, kept as JSON
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Value>,

    /// Channel specific payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<Value>,

    /// Id of the activity this one replies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,

    /// Name of an event or invoke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Value of an event or invoke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Reference to another conversation or activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relates_to: Option<ConversationReference>,

    /// Delivery mode (`normal`, `notification`, `expectReplies`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_mode: Option<String>,

    /// Remaining properties
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Activity {
    /// A message activity with the given text
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            kind: Some(activity_types::MESSAGE.to_string()),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set the attachments
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Whether this activity has the given type
    pub fn is_type(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }

    /// A reference that can be used to continue this conversation later
    pub fn get_conversation_reference(&self) -> ConversationReference {
        ConversationReference {
            activity_id: self.id.clone(),
            user: self.from.clone(),
            bot: self.recipient.clone(),
            conversation: self.conversation.clone(),
            channel_id: self.channel_id.clone(),
            locale: self.locale.clone(),
            service_url: self.service_url.clone(),
        }
    }

    /// Teams channel data, if the activity carries any
    pub fn teams_channel_data(&self) -> Result<Option<TeamsChannelData>> {
        match &self.channel_data {
            None | Some(Value::Null) => Ok(None),
            Some(data) => Ok(Some(serde_json::from_value(data.clone())?)),
        }
    }

    /// The team the activity was sent in, if any
    pub fn teams_team_info(&self) -> Option<TeamInfo> {
        self.teams_channel_data().ok().flatten()?.team
    }

    /// The team id, or `None` outside a team scope
    pub fn teams_team_id(&self) -> Option<String> {
        self.teams_team_info()?.id.filter(|id| !id.is_empty())
    }

    /// The meeting id, when the activity was sent from a meeting
    pub fn teams_meeting_id(&self) -> Option<String> {
        self.teams_channel_data()
            .ok()
            .flatten()?
            .meeting?
            .id
            .filter(|id| !id.is_empty())
    }

    /// The tenant id from the Teams channel data
    pub fn teams_tenant_id(&self) -> Option<String> {
        self.teams_channel_data()
            .ok()
            .flatten()?
            .tenant?
            .id
            .filter(|id| !id.is_empty())
    }
}
