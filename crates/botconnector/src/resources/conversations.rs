//! Conversations API endpoint

use super::{Resource, require};
use crate::{
    client::Client,
    error::Result,
    http::{RawResponse, encode_segment},
};
use botconnector_schema::{
    Activity, AttachmentData, ChannelAccount, ConversationParameters,
    ConversationResourceResponse, ConversationsResult, PagedMembersResult, ResourceResponse,
    TeamsPagedMembersResult, Transcript,
};
use http::Method;

/// Conversations API resource.
///
/// Create conversations, post and edit activities, and list members.
#[derive(Clone)]
pub struct Conversations {
    client: Client,
}

fn conversation_path(conversation_id: &str) -> Result<String> {
    Ok(format!(
        "v3/conversations/{}",
        encode_segment(require(conversation_id, "conversation_id")?)
    ))
}

fn activity_path(conversation_id: &str, activity_id: &str) -> Result<String> {
    Ok(format!(
        "{}/activities/{}",
        conversation_path(conversation_id)?,
        encode_segment(require(activity_id, "activity_id")?)
    ))
}

fn member_path(conversation_id: &str, member_id: &str) -> Result<String> {
    Ok(format!(
        "{}/members/{}",
        conversation_path(conversation_id)?,
        encode_segment(require(member_id, "member_id")?)
    ))
}

impl Conversations {
    /// Create a new Conversations resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// One page of the conversations the bot takes part in.
    ///
    /// Pass the previous page's `continuation_token` to get the next one.
    pub async fn get_conversations(
        &self,
        continuation_token: Option<&str>,
    ) -> Result<ConversationsResult> {
        self.client
            .traced("get_conversations", async {
                self.client
                    .request(Method::GET, "v3/conversations")?
                    .query("continuationToken", continuation_token)
                    .send()
                    .await?
                    .parse_result()
            })
            .await
    }

    /// Create a new conversation.
    pub async fn create_conversation(
        &self,
        parameters: &ConversationParameters,
    ) -> Result<ConversationResourceResponse> {
        self.client
            .traced("create_conversation", async {
                self.client
                    .request(Method::POST, "v3/conversations")?
                    .json(parameters)?
                    .send()
                    .await?
                    .parse_result()
            })
            .await
    }

    /// Post an activity to the end of a conversation.
    pub async fn send_to_conversation(
        &self,
        conversation_id: &str,
        activity: &Activity,
    ) -> Result<ResourceResponse> {
        let path = format!("{}/activities", conversation_path(conversation_id)?);
        self.send_activity("send_to_conversation", Method::POST, &path, activity)
            .await
    }

    /// Import historic activities into a conversation.
    pub async fn send_conversation_history(
        &self,
        conversation_id: &str,
        transcript: &Transcript,
    ) -> Result<ResourceResponse> {
        let path = format!("{}/activities/history", conversation_path(conversation_id)?);
        self.client
            .traced("send_conversation_history", async {
                self.client
                    .request(Method::POST, &path)?
                    .json(transcript)?
                    .send()
                    .await?
                    .parse_optional()
                    .map(Option::unwrap_or_default)
            })
            .await
    }

    /// Replace an existing activity.
    pub async fn update_activity(
        &self,
        conversation_id: &str,
        activity_id: &str,
        activity: &Activity,
    ) -> Result<ResourceResponse> {
        let path = activity_path(conversation_id, activity_id)?;
        self.send_activity("update_activity", Method::PUT, &path, activity)
            .await
    }

    /// Reply to an activity; threaded where the channel supports it.
    pub async fn reply_to_activity(
        &self,
        conversation_id: &str,
        activity_id: &str,
        activity: &Activity,
    ) -> Result<ResourceResponse> {
        let path = activity_path(conversation_id, activity_id)?;
        self.send_activity("reply_to_activity", Method::POST, &path, activity)
            .await
    }

    /// Delete an activity.
    pub async fn delete_activity(&self, conversation_id: &str, activity_id: &str) -> Result<()> {
        let path = activity_path(conversation_id, activity_id)?;
        self.client
            .traced("delete_activity", async {
                self.client
                    .request(Method::DELETE, &path)?
                    .send()
                    .await?
                    .ensure_success()
                    .map(drop)
            })
            .await
    }

    /// All members of a conversation.
    pub async fn get_conversation_members(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<ChannelAccount>> {
        let path = format!("{}/members", conversation_path(conversation_id)?);
        self.get("get_conversation_members", &path).await
    }

    /// One member of a conversation.
    pub async fn get_conversation_member(
        &self,
        conversation_id: &str,
        member_id: &str,
    ) -> Result<ChannelAccount> {
        let path = member_path(conversation_id, member_id)?;
        self.get("get_conversation_member", &path).await
    }

    /// One page of conversation members.
    pub async fn get_conversation_paged_members(
        &self,
        conversation_id: &str,
        page_size: Option<u32>,
        continuation_token: Option<&str>,
    ) -> Result<PagedMembersResult> {
        self.paged_members(
            "get_conversation_paged_members",
            conversation_id,
            page_size,
            continuation_token,
        )
        .await
    }

    /// One page of conversation members with their Teams profile fields.
    pub async fn get_teams_conversation_paged_members(
        &self,
        conversation_id: &str,
        page_size: Option<u32>,
        continuation_token: Option<&str>,
    ) -> Result<TeamsPagedMembersResult> {
        self.paged_members(
            "get_teams_conversation_paged_members",
            conversation_id,
            page_size,
            continuation_token,
        )
        .await
    }

    /// Remove a member from a conversation.
    pub async fn delete_conversation_member(
        &self,
        conversation_id: &str,
        member_id: &str,
    ) -> Result<()> {
        let path = member_path(conversation_id, member_id)?;
        self.client
            .traced("delete_conversation_member", async {
                self.client
                    .request(Method::DELETE, &path)?
                    .send()
                    .await?
                    .ensure_success()
                    .map(drop)
            })
            .await
    }

    /// Members that an activity was sent to.
    pub async fn get_activity_members(
        &self,
        conversation_id: &str,
        activity_id: &str,
    ) -> Result<Vec<ChannelAccount>> {
        let path = format!("{}/members", activity_path(conversation_id, activity_id)?);
        self.get("get_activity_members", &path).await
    }

    /// Upload an attachment to the channel's blob storage.
    pub async fn upload_attachment(
        &self,
        conversation_id: &str,
        attachment: &AttachmentData,
    ) -> Result<ResourceResponse> {
        let path = format!("{}/attachments", conversation_path(conversation_id)?);
        self.client
            .traced("upload_attachment", async {
                self.client
                    .request(Method::POST, &path)?
                    .json(attachment)?
                    .send()
                    .await?
                    .parse_result()
            })
            .await
    }

    /// Enable raw response mode.
    ///
    /// Returns a wrapper whose methods also hand back the status and
    /// headers, e.g. for the `x-ms-request-id` of a posted message.
    pub fn with_raw_response(&self) -> ConversationsRaw {
        ConversationsRaw {
            client: self.client.clone(),
        }
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

    async fn paged_members<T: serde::de::DeserializeOwned>(
        &self,
        operation: &'static str,
        conversation_id: &str,
        page_size: Option<u32>,
        continuation_token: Option<&str>,
    ) -> Result<T> {
        let path = format!("{}/pagedmembers", conversation_path(conversation_id)?);
        self.client
            .traced(operation, async {
                self.client
                    .request(Method::GET, &path)?
                    .query("pageSize", page_size.map(|n| n.to_string()))
                    .query("continuationToken", continuation_token)
                    .send()
                    .await?
                    .parse_result()
            })
            .await
    }

    /// Some channels answer a posted activity with an empty body.
    async fn send_activity(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        activity: &Activity,
    ) -> Result<ResourceResponse> {
        self.client
            .traced(operation, async {
                self.client
                    .request(method, path)?
                    .json(activity)?
                    .send()
                    .await?
                    .parse_optional()
                    .map(Option::unwrap_or_default)
            })
            .await
    }
}

impl Resource for Conversations {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Conversations API with raw response access.
#[derive(Clone)]
pub struct ConversationsRaw {
    client: Client,
}

impl ConversationsRaw {
    /// Post an activity and return the created id with HTTP metadata.
    pub async fn send_to_conversation(
        &self,
        conversation_id: &str,
        activity: &Activity,
    ) -> Result<RawResponse<ResourceResponse>> {
        let path = format!("{}/activities", conversation_path(conversation_id)?);
        self.client
            .traced("send_to_conversation", async {
                self.client
                    .request(Method::POST, &path)?
                    .json(activity)?
                    .send()
                    .await?
                    .into_parsed_raw()
            })
            .await
    }

    /// Reply to an activity and return the created id with HTTP metadata.
    pub async fn reply_to_activity(
        &self,
        conversation_id: &str,
        activity_id: &str,
        activity: &Activity,
    ) -> Result<RawResponse<ResourceResponse>> {
        let path = activity_path(conversation_id, activity_id)?;
        self.client
            .traced("reply_to_activity", async {
                self.client
                    .request(Method::POST, &path)?
                    .json(activity)?
                    .send()
                    .await?
                    .into_parsed_raw()
            })
            .await
    }
}

impl Resource for ConversationsRaw {
    fn client(&self) -> &Client {
        &self.client
    }
}
