//! Microsoft Teams specific types

use crate::account::{ConversationAccount, TeamsChannelAccount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Channel data Teams attaches to every activity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamsChannelData {
    /// Channel the activity was sent in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelInfo>,

    /// Type of event (`teamMemberAdded`, `channelCreated`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    /// Team the activity was sent in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamInfo>,

    /// Tenant the activity was sent in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantInfo>,

    /// Meeting the activity was sent in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting: Option<TeamsMeetingInfo>,

    /// Remaining properties
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl TeamsChannelData {
    /// Channel data addressing the given channel
    pub fn for_channel(channel_id: impl Into<String>) -> Self {
        Self {
            channel: Some(ChannelInfo {
                id: Some(channel_id.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// A Teams channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    /// Channel id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Channel name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Channel type (`standard`, `private`, `shared`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A Teams team
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    /// Team id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Team name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Azure Active Directory group id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aad_group_id: Option<String>,
}

/// A Teams tenant
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantInfo {
    /// Tenant id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Meeting reference carried in channel data
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamsMeetingInfo {
    /// Meeting id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Details of a team
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetails {
    /// Team id
    #[serde(default)]
    pub id: Option<String>,

    /// Team name
    #[serde(default)]
    pub name: Option<String>,

    /// Azure Active Directory group id
    #[serde(default)]
    pub aad_group_id: Option<String>,

    /// Number of channels
    #[serde(default)]
    pub channel_count: u32,

    /// Number of members
    #[serde(default)]
    pub member_count: u32,

    /// Team type (`standard`, `sharedChannel`, `privateChannel`)
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Channels of a team
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationList {
    /// The channels
    #[serde(default)]
    pub conversations: Vec<ChannelInfo>,
}

/// A member addressed by a batch operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    /// Member or channel id
    pub id: String,
}

impl TeamMember {
    /// A batch target with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Details of an online meeting
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInfo {
    /// Meeting details
    #[serde(default)]
    pub details: Option<MeetingDetails>,

    /// Chat conversation of the meeting
    #[serde(default)]
    pub conversation: Option<ConversationAccount>,

    /// Organizer of the meeting
    #[serde(default)]
    pub organizer: Option<TeamsChannelAccount>,
}

/// Scheduling details of a meeting
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDetails {
    /// Meeting id
    #[serde(default)]
    pub id: Option<String>,

    /// Microsoft Graph resource id
    #[serde(default)]
    pub ms_graph_resource_id: Option<String>,

    /// Scheduled start
    #[serde(default)]
    pub scheduled_start_time: Option<DateTime<Utc>>,

    /// Scheduled end
    #[serde(default)]
    pub scheduled_end_time: Option<DateTime<Utc>>,

    /// Join URL
    #[serde(default)]
    pub join_url: Option<String>,

    /// Title
    #[serde(default)]
    pub title: Option<String>,

    /// Meeting type (`Scheduled`, `Recurring`, ...)
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A participant of a meeting
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamsMeetingParticipant {
    /// The participant
    #[serde(default)]
    pub user: Option<TeamsChannelAccount>,

    /// The participant's role in the meeting
    #[serde(default)]
    pub meeting: Option<MeetingParticipantInfo>,

    /// Chat conversation of the meeting
    #[serde(default)]
    pub conversation: Option<ConversationAccount>,
}

/// A participant's meeting specific information
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingParticipantInfo {
    /// Role (`Organizer`, `Presenter`, `Attendee`)
    #[serde(default)]
    pub role: Option<String>,

    /// Whether the participant is currently in the meeting
    #[serde(default)]
    pub in_meeting: Option<bool>,
}

/// Wire value of [`MeetingNotification::kind`] for targeted notifications
pub const TARGETED_MEETING_NOTIFICATION: &str = "targetedMeetingNotification";

/// A notification shown to selected meeting participants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingNotification {
    /// Notification type
    #[serde(rename = "type")]
    pub kind: String,

    /// Recipients and surfaces
    pub value: TargetedMeetingNotificationValue,

    /// Channel specific payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<Value>,
}

impl MeetingNotification {
    /// A targeted notification for the given participants
    pub fn targeted(recipients: Vec<String>, surfaces: Vec<MeetingSurface>) -> Self {
        Self {
            kind: TARGETED_MEETING_NOTIFICATION.to_string(),
            value: TargetedMeetingNotificationValue {
                recipients,
                surfaces,
            },
            channel_data: None,
        }
    }
}

/// Recipients and surfaces of a targeted meeting notification
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TargetedMeetingNotificationValue {
    /// Participant ids to notify
    pub recipients: Vec<String>,

    /// Where to show the notification
    pub surfaces: Vec<MeetingSurface>,
}

/// A meeting surface showing notification content
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSurface {
    /// Surface (`meetingStage`, `meetingTabIcon`)
    pub surface: String,

    /// Content type (`task`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Content to show
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    /// Tab entity id, for tab surfaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_entity_id: Option<String>,
}

/// Recipients that could not be notified
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingNotificationResponse {
    /// One entry per failed recipient
    #[serde(default)]
    pub recipients_failure_info: Vec<MeetingNotificationRecipientFailureInfo>,
}

/// Why a recipient could not be notified
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingNotificationRecipientFailureInfo {
    /// Recipient MRI
    #[serde(default)]
    pub recipient_mri: Option<String>,

    /// Error code
    #[serde(default)]
    pub error_code: Option<String>,

    /// Failure reason
    #[serde(default)]
    pub failure_reason: Option<String>,
}
