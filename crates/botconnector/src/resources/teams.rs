//! Teams API endpoint
//!
//! Team and meeting lookups are single attempts. The batch messaging
//! operations are rate limited by the service and run under the client's
//! throttle policy: a 429 is retried, honouring `Retry-After`, while every
//! other failure is returned at once.

use super::{Resource, require};
use crate::{
    client::Client,
    error::{Error, Result},
    http::encode_segment,
};
use botconnector_schema::{
    Activity, BatchFailedEntriesResponse, BatchOperationState, ConversationList, MeetingInfo,
    MeetingNotification, MeetingNotificationResponse, TeamDetails, TeamMember,
    TeamsMeetingParticipant,
};
use http::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Teams API resource.
#[derive(Clone)]
pub struct Teams {
    client: Client,
    cancel: Option<CancellationToken>,
}

/// Body of the batch send requests. The service expects PascalCase keys.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct BatchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    members: Option<&'a [TeamMember]>,
    activity: &'a Activity,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<&'a str>,
    tenant_id: &'a str,
}

/// A batch send answers with the operation id, either bare or wrapped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OperationId {
    Bare(String),
    Wrapped {
        #[serde(rename = "operationId")]
        operation_id: String,
    },
}

impl From<OperationId> for String {
    fn from(id: OperationId) -> Self {
        match id {
            OperationId::Bare(id) | OperationId::Wrapped { operation_id: id } => id,
        }
    }
}

fn require_members<'a>(members: &'a [TeamMember], name: &str) -> Result<&'a [TeamMember]> {
    if members.is_empty() {
        return Err(Error::InvalidArgument(format!("{} cannot be empty.", name)));
    }
    Ok(members)
}

impl Teams {
    /// Create a new Teams resource.
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            cancel: None,
        }
    }

    /// A handle whose batch operations stop retrying once `token` is
    /// cancelled, failing with [`Error::Cancelled`].
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            client: self.client.clone(),
            cancel: Some(token),
        }
    }

    /// Channels of a team.
    pub async fn fetch_channel_list(&self, team_id: &str) -> Result<ConversationList> {
        let path = format!(
            "v3/teams/{}/conversations",
            encode_segment(require(team_id, "team_id")?)
        );
        self.get("fetch_channel_list", &path).await
    }

    /// Details of a team.
    pub async fn fetch_team_details(&self, team_id: &str) -> Result<TeamDetails> {
        let path = format!("v3/teams/{}", encode_segment(require(team_id, "team_id")?));
        self.get("fetch_team_details", &path).await
    }

    /// A participant of a meeting, with their meeting role.
    pub async fn fetch_participant(
        &self,
        meeting_id: &str,
        participant_id: &str,
        tenant_id: &str,
    ) -> Result<TeamsMeetingParticipant> {
        let path = format!(
            "v1/meetings/{}/participants/{}",
            encode_segment(require(meeting_id, "meeting_id")?),
            encode_segment(require(participant_id, "participant_id")?)
        );
        let tenant_id = require(tenant_id, "tenant_id")?;
        self.client
            .traced("fetch_participant", async {
                self.client
                    .request(Method::GET, &path)?
                    .query("tenantId", Some(tenant_id))
                    .send()
                    .await?
                    .parse_result()
            })
            .await
    }

    /// Details of a meeting.
    pub async fn fetch_meeting_info(&self, meeting_id: &str) -> Result<MeetingInfo> {
        let path = format!(
            "v1/meetings/{}",
            encode_segment(require(meeting_id, "meeting_id")?)
        );
        self.get("fetch_meeting_info", &path).await
    }

    /// Send an in-meeting notification.
    ///
    /// `None` means every recipient was notified; otherwise the response
    /// lists the recipients that failed.
    pub async fn send_meeting_notification(
        &self,
        meeting_id: &str,
        notification: &MeetingNotification,
    ) -> Result<Option<MeetingNotificationResponse>> {
        let path = format!(
            "v1/meetings/{}/notification",
            encode_segment(require(meeting_id, "meeting_id")?)
        );
        self.client
            .traced("send_meeting_notification", async {
                self.client
                    .request(Method::POST, &path)?
                    .json(notification)?
                    .send()
                    .await?
                    .parse_optional()
            })
            .await
    }

    /// Send a message to each of the given users. Returns the operation id.
    pub async fn send_message_to_list_of_users(
        &self,
        activity: &Activity,
        members: &[TeamMember],
        tenant_id: &str,
    ) -> Result<String> {
        let body = BatchRequest {
            members: Some(require_members(members, "members")?),
            activity,
            team_id: None,
            tenant_id: require(tenant_id, "tenant_id")?,
        };
        self.send_batch("send_message_to_list_of_users", "v3/batch/conversation/users/", &body)
            .await
    }

    /// Send a message to every user in a tenant. Returns the operation id.
    pub async fn send_message_to_all_users_in_tenant(
        &self,
        activity: &Activity,
        tenant_id: &str,
    ) -> Result<String> {
        let body = BatchRequest {
            members: None,
            activity,
            team_id: None,
            tenant_id: require(tenant_id, "tenant_id")?,
        };
        self.send_batch(
            "send_message_to_all_users_in_tenant",
            "v3/batch/conversation/tenant/",
            &body,
        )
        .await
    }

    /// Send a message to every member of a team. Returns the operation id.
    pub async fn send_message_to_all_users_in_team(
        &self,
        activity: &Activity,
        team_id: &str,
        tenant_id: &str,
    ) -> Result<String> {
        let body = BatchRequest {
            members: None,
            activity,
            team_id: Some(require(team_id, "team_id")?),
            tenant_id: require(tenant_id, "tenant_id")?,
        };
        self.send_batch(
            "send_message_to_all_users_in_team",
            "v3/batch/conversation/team/",
            &body,
        )
        .await
    }

    /// Post a message in each of the given channels. Returns the operation id.
    pub async fn send_message_to_list_of_channels(
        &self,
        activity: &Activity,
        channels: &[TeamMember],
        tenant_id: &str,
    ) -> Result<String> {
        let body = BatchRequest {
            members: Some(require_members(channels, "channels")?),
            activity,
            team_id: None,
            tenant_id: require(tenant_id, "tenant_id")?,
        };
        self.send_batch(
            "send_message_to_list_of_channels",
            "v3/batch/conversation/channels/",
            &body,
        )
        .await
    }

    /// Progress of a batch operation.
    pub async fn get_operation_state(&self, operation_id: &str) -> Result<BatchOperationState> {
        let path = batch_path(operation_id)?;
        let path = path.as_str();
        let client = &self.client;
        client
            .throttled("get_operation_state", self.cancel.as_ref(), move || async move {
                client
                    .request(Method::GET, path)?
                    .send()
                    .await?
                    .parse_result()
            })
            .await
    }

    /// One page of the entries a batch operation failed to deliver.
    pub async fn get_paged_failed_entries(
        &self,
        operation_id: &str,
        continuation_token: Option<&str>,
    ) -> Result<BatchFailedEntriesResponse> {
        let path = format!(
            "v3/batch/conversation/failedentries/{}",
            encode_segment(require(operation_id, "operation_id")?)
        );
        let path = path.as_str();
        let client = &self.client;
        client
            .throttled("get_paged_failed_entries", self.cancel.as_ref(), move || async move {
                client
                    .request(Method::GET, path)?
                    .query("continuationToken", continuation_token)
                    .send()
                    .await?
                    .parse_result()
            })
            .await
    }

    /// Cancel a batch operation that has not finished.
    pub async fn cancel_operation(&self, operation_id: &str) -> Result<()> {
        let path = batch_path(operation_id)?;
        let path = path.as_str();
        let client = &self.client;
        client
            .throttled("cancel_operation", self.cancel.as_ref(), move || async move {
                client
                    .request(Method::DELETE, path)?
                    .send()
                    .await?
                    .ensure_success()
                    .map(drop)
            })
            .await
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T> {
        self.client
            .traced(operation, async {
                self.client
                    .request(Method::GET, path)?
                    .send()
                    .await?
                    .parse_result()
            })
            .await
    }

    async fn send_batch(
        &self,
        operation: &'static str,
        path: &str,
        body: &BatchRequest<'_>,
    ) -> Result<String> {
        let client = &self.client;
        client
            .throttled(operation, self.cancel.as_ref(), move || async move {
                client
                    .request(Method::POST, path)?
                    .json(body)?
                    .send()
                    .await?
                    .parse_result::<OperationId>()
                    .map(String::from)
            })
            .await
    }
}

fn batch_path(operation_id: &str) -> Result<String> {
    Ok(format!(
        "v3/batch/conversation/{}",
        encode_segment(require(operation_id, "operation_id")?)
    ))
}

impl Resource for Teams {
    fn client(&self) -> &Client {
        &self.client
    }
}
