//! Teams helpers scoped to an incoming activity
//!
//! [`TeamsInfo`] fills in the team, meeting, participant and tenant ids an
//! operation needs from the activity's Teams channel data, so a handler can
//! ask "who is in this team" without digging through `channelData` itself.

use crate::{
    client::Client,
    error::{Error, Result},
};
use botconnector_schema::{
    Activity, BatchFailedEntriesResponse, BatchOperationState, ChannelAccount, ChannelInfo,
    ConversationAccount, ConversationParameters, ConversationReference, MeetingInfo,
    MeetingNotification, MeetingNotificationResponse, TeamDetails, TeamMember,
    TeamsChannelAccount, TeamsChannelData, TeamsMeetingParticipant, TeamsPagedMembersResult,
};

/// Teams operations in the context of one activity.
///
/// # Example
///
/// ```rust,no_run
/// # use botconnector::{Client, TeamsInfo};
/// # use botconnector::schema::Activity;
/// # async fn example(client: Client, activity: Activity) -> botconnector::Result<()> {
/// let info = TeamsInfo::new(&client, &activity);
/// for member in info.get_members().await? {
///     println!("{:?}", member.email);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TeamsInfo<'a> {
    client: Client,
    activity: &'a Activity,
}

impl<'a> TeamsInfo<'a> {
    /// Use `client` as is for requests about `activity`.
    pub fn new(client: &Client, activity: &'a Activity) -> Self {
        Self {
            client: client.clone(),
            activity,
        }
    }

    /// Like [`new`](Self::new), but sends requests to the activity's own
    /// service URL when it carries one.
    ///
    /// # Errors
    ///
    /// See [`Client::with_service_url`].
    pub fn for_activity(client: &Client, activity: &'a Activity) -> Result<Self> {
        let client = match activity.service_url.as_deref() {
            Some(url) if !url.is_empty() => client.with_service_url(url)?,
            _ => client.clone(),
        };
        Ok(Self { client, activity })
    }

    /// The client requests are sent with.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Id of the team the activity was sent in, if any.
    pub fn get_team_id(&self) -> Option<String> {
        self.activity.teams_team_id()
    }

    fn team_id_or(&self, team_id: Option<&str>, method: &str) -> Result<String> {
        non_empty(team_id)
            .map(String::from)
            .or_else(|| self.get_team_id())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "TeamsInfo.{}: method is only valid within the scope of MS Teams Team.",
                    method
                ))
            })
    }

    fn conversation_id(&self, method: &str) -> Result<&'a str> {
        self.activity
            .conversation
            .as_ref()
            .and_then(|c| c.id.as_deref())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "TeamsInfo.{}: the activity has no conversation id.",
                    method
                ))
            })
    }

    /// Details of a team; defaults to the activity's team.
    pub async fn get_team_details(&self, team_id: Option<&str>) -> Result<TeamDetails> {
        let team_id = self.team_id_or(team_id, "get_team_details")?;
        self.client.teams().fetch_team_details(&team_id).await
    }

    /// Channels of a team; defaults to the activity's team.
    pub async fn get_team_channels(&self, team_id: Option<&str>) -> Result<Vec<ChannelInfo>> {
        let team_id = self.team_id_or(team_id, "get_team_channels")?;
        Ok(self
            .client
            .teams()
            .fetch_channel_list(&team_id)
            .await?
            .conversations)
    }

    /// All members of a team; defaults to the activity's team.
    pub async fn get_team_members(
        &self,
        team_id: Option<&str>,
    ) -> Result<Vec<TeamsChannelAccount>> {
        let team_id = self.team_id_or(team_id, "get_team_members")?;
        self.members_of(&team_id).await
    }

    /// Members of the activity's team, or of its conversation outside a team.
    pub async fn get_members(&self) -> Result<Vec<TeamsChannelAccount>> {
        match self.get_team_id() {
            Some(team_id) => self.members_of(&team_id).await,
            None => self.members_of(self.conversation_id("get_members")?).await,
        }
    }

    /// One page of a team's members; defaults to the activity's team.
    pub async fn get_paged_team_members(
        &self,
        team_id: Option<&str>,
        continuation_token: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<TeamsPagedMembersResult> {
        let team_id = self.team_id_or(team_id, "get_paged_team_members")?;
        self.client
            .conversations()
            .get_teams_conversation_paged_members(&team_id, page_size, continuation_token)
            .await
    }

    /// One page of members of the activity's team, or of its conversation
    /// outside a team.
    pub async fn get_paged_members(
        &self,
        continuation_token: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<TeamsPagedMembersResult> {
        let scope = match self.get_team_id() {
            Some(team_id) => team_id,
            None => self.conversation_id("get_paged_members")?.to_string(),
        };
        self.client
            .conversations()
            .get_teams_conversation_paged_members(&scope, page_size, continuation_token)
            .await
    }

    /// One member of a team; defaults to the activity's team.
    pub async fn get_team_member(
        &self,
        team_id: Option<&str>,
        member_id: &str,
    ) -> Result<TeamsChannelAccount> {
        let team_id = self.team_id_or(team_id, "get_team_member")?;
        if member_id.is_empty() {
            return Err(Error::InvalidArgument(
                "TeamsInfo.get_team_member: method requires a member_id".to_string(),
            ));
        }
        self.member_of(&team_id, member_id).await
    }

    /// One member of the activity's team, or of its conversation outside a team.
    pub async fn get_member(&self, member_id: &str) -> Result<TeamsChannelAccount> {
        if member_id.is_empty() {
            return Err(Error::InvalidArgument(
                "TeamsInfo.get_member: method requires a member_id".to_string(),
            ));
        }
        match self.get_team_id() {
            Some(team_id) => self.member_of(&team_id, member_id).await,
            None => {
                self.member_of(self.conversation_id("get_member")?, member_id)
                    .await
            }
        }
    }

    /// A meeting participant.
    ///
    /// Defaults: the activity's meeting, the sender's AAD object id, and the
    /// tenant from the Teams channel data.
    pub async fn get_meeting_participant(
        &self,
        meeting_id: Option<&str>,
        participant_id: Option<&str>,
        tenant_id: Option<&str>,
    ) -> Result<TeamsMeetingParticipant> {
        let meeting_id = self.meeting_id_or(meeting_id, "get_meeting_participant")?;
        let participant_id = non_empty(participant_id)
            .map(String::from)
            .or_else(|| {
                self.activity
                    .from
                    .as_ref()
                    .and_then(|from| from.aad_object_id.clone())
                    .filter(|id| !id.is_empty())
            })
            .ok_or_else(|| {
                Error::InvalidArgument(
                    "TeamsInfo.get_meeting_participant: method requires a participant_id"
                        .to_string(),
                )
            })?;
        let tenant_id = non_empty(tenant_id)
            .map(String::from)
            .or_else(|| self.activity.teams_tenant_id())
            .ok_or_else(|| {
                Error::InvalidArgument(
                    "TeamsInfo.get_meeting_participant: method requires a tenant_id".to_string(),
                )
            })?;

        self.client
            .teams()
            .fetch_participant(&meeting_id, &participant_id, &tenant_id)
            .await
    }

    /// Details of a meeting; defaults to the activity's meeting.
    pub async fn get_meeting_info(&self, meeting_id: Option<&str>) -> Result<MeetingInfo> {
        let meeting_id = self.meeting_id_or(meeting_id, "get_meeting_info")?;
        self.client.teams().fetch_meeting_info(&meeting_id).await
    }

    /// Send an in-meeting notification; defaults to the activity's meeting.
    pub async fn send_meeting_notification(
        &self,
        notification: &MeetingNotification,
        meeting_id: Option<&str>,
    ) -> Result<Option<MeetingNotificationResponse>> {
        let meeting_id = self.meeting_id_or(meeting_id, "send_meeting_notification")?;
        self.client
            .teams()
            .send_meeting_notification(&meeting_id, notification)
            .await
    }

    /// Start a new thread in a Teams channel with `activity` as its first post.
    ///
    /// Returns a reference to the new conversation and the id of the posted
    /// activity.
    pub async fn send_message_to_teams_channel(
        &self,
        activity: &Activity,
        teams_channel_id: &str,
        bot_app_id: Option<&str>,
    ) -> Result<(ConversationReference, String)> {
        if teams_channel_id.is_empty() {
            return Err(Error::InvalidArgument(
                "The teams_channel_id cannot be None or empty".to_string(),
            ));
        }

        let channel_data = serde_json::to_value(TeamsChannelData::for_channel(teams_channel_id))?;
        let bot = non_empty(bot_app_id)
            .map(|id| ChannelAccount {
                id: Some(id.to_string()),
                ..Default::default()
            })
            .or_else(|| self.activity.recipient.clone());
        let parameters = ConversationParameters {
            is_group: Some(true),
            bot,
            channel_data: Some(channel_data),
            activity: Some(activity.clone()),
            tenant_id: self.activity.teams_tenant_id(),
            ..Default::default()
        };

        let created = self
            .client
            .conversations()
            .create_conversation(&parameters)
            .await?;

        let mut reference = self.activity.get_conversation_reference();
        reference.conversation = Some(ConversationAccount {
            is_group: Some(true),
            tenant_id: parameters.tenant_id.clone(),
            ..ConversationAccount::new(created.id.unwrap_or_default())
        });
        reference.activity_id = created.activity_id.clone();
        if created.service_url.is_some() {
            reference.service_url = created.service_url;
        }

        Ok((reference, created.activity_id.unwrap_or_default()))
    }

    /// See [`Teams::send_message_to_list_of_users`](crate::resources::Teams::send_message_to_list_of_users).
    pub async fn send_message_to_list_of_users(
        &self,
        activity: &Activity,
        members: &[TeamMember],
        tenant_id: &str,
    ) -> Result<String> {
        self.client
            .teams()
            .send_message_to_list_of_users(activity, members, tenant_id)
            .await
    }

    /// See [`Teams::send_message_to_all_users_in_tenant`](crate::resources::Teams::send_message_to_all_users_in_tenant).
    pub async fn send_message_to_all_users_in_tenant(
        &self,
        activity: &Activity,
        tenant_id: &str,
    ) -> Result<String> {
        self.client
            .teams()
            .send_message_to_all_users_in_tenant(activity, tenant_id)
            .await
    }

    /// See [`Teams::send_message_to_all_users_in_team`](crate::resources::Teams::send_message_to_all_users_in_team).
    pub async fn send_message_to_all_users_in_team(
        &self,
        activity: &Activity,
        team_id: &str,
        tenant_id: &str,
    ) -> Result<String> {
        self.client
            .teams()
            .send_message_to_all_users_in_team(activity, team_id, tenant_id)
            .await
    }

    /// See [`Teams::send_message_to_list_of_channels`](crate::resources::Teams::send_message_to_list_of_channels).
    pub async fn send_message_to_list_of_channels(
        &self,
        activity: &Activity,
        channels: &[TeamMember],
        tenant_id: &str,
    ) -> Result<String> {
        self.client
            .teams()
            .send_message_to_list_of_channels(activity, channels, tenant_id)
            .await
    }

    /// State of a batch operation.
    pub async fn get_operation_state(&self, operation_id: &str) -> Result<BatchOperationState> {
        self.client.teams().get_operation_state(operation_id).await
    }

    /// One page of failed entries of a batch operation.
    pub async fn get_paged_failed_entries(
        &self,
        operation_id: &str,
        continuation_token: Option<&str>,
    ) -> Result<BatchFailedEntriesResponse> {
        self.client
            .teams()
            .get_paged_failed_entries(operation_id, continuation_token)
            .await
    }

    /// Cancel a batch operation.
    pub async fn cancel_operation(&self, operation_id: &str) -> Result<()> {
        self.client.teams().cancel_operation(operation_id).await
    }

    fn meeting_id_or(&self, meeting_id: Option<&str>, method: &str) -> Result<String> {
        non_empty(meeting_id)
            .map(String::from)
            .or_else(|| self.activity.teams_meeting_id())
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "TeamsInfo.{}: method requires a meeting_id or an activity that contains a meeting id",
                    method
                ))
            })
    }

    async fn members_of(&self, scope_id: &str) -> Result<Vec<TeamsChannelAccount>> {
        self.client
            .conversations()
            .get_conversation_members(scope_id)
            .await?
            .into_iter()
            .map(|member| TeamsChannelAccount::try_from(member).map_err(Error::from))
            .collect()
    }

    async fn member_of(&self, scope_id: &str, member_id: &str) -> Result<TeamsChannelAccount> {
        let member = self
            .client
            .conversations()
            .get_conversation_member(scope_id, member_id)
            .await?;
        Ok(TeamsChannelAccount::try_from(member)?)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
