//! Bot Framework and Microsoft Teams schema types
//!
//! Plain serde data types for the Bot Connector REST API: activities,
//! accounts, conversations, attachments, and the Teams extensions used by
//! the `botconnector` client.
//!
//! # Type Organization
//!
//! - **Activities**: [`activity`] - the message envelope and its helpers
//! - **Accounts**: [`account`] - users, bots, conversations
//! - **Conversations**: [`conversation`] - request and response bodies
//! - **Attachments**: [`attachment`] - inline attachments and uploads
//! - **Teams**: [`teams`] - teams, channels, meetings, notifications
//! - **Batch**: [`batch`] - batch messaging state
//!
//! Everything is camelCase on the wire. Types that the service extends
//! freely keep unknown fields in a flattened `properties` map.
//!
//! # Usage
//!
//! ```rust
//! use botconnector_schema::Activity;
//!
//! let activity: Activity = serde_json::from_str(
//!     r#"{"type":"message","text":"hi","channelData":{"team":{"id":"19:t"}}}"#,
//! )
//! .unwrap();
//! assert_eq!(activity.teams_team_id().as_deref(), Some("19:t"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod activity;
pub mod attachment;
pub mod batch;
pub mod conversation;
pub mod error;
pub mod teams;

pub use account::{ChannelAccount, ConversationAccount, TeamsChannelAccount};
pub use activity::{Activity, activity_types};
pub use attachment::{Attachment, AttachmentData, AttachmentInfo, AttachmentView};
pub use batch::{BatchFailedEntriesResponse, BatchFailedEntry, BatchOperationState};
pub use conversation::{
    ConversationMembers, ConversationParameters, ConversationReference,
    ConversationResourceResponse, ConversationsResult, PagedMembersResult, ResourceResponse,
    TeamsPagedMembersResult, Transcript,
};
pub use error::{Result, SchemaError};
pub use teams::{
    ChannelInfo, ConversationList, MeetingDetails, MeetingInfo, MeetingNotification,
    MeetingNotificationRecipientFailureInfo, MeetingNotificationResponse, MeetingParticipantInfo,
    MeetingSurface, TargetedMeetingNotificationValue, TeamDetails, TeamInfo, TeamMember,
    TeamsChannelData, TeamsMeetingInfo, TeamsMeetingParticipant, TenantInfo,
};
