//! TeamsInfo defaults taken from the incoming activity

mod common;

use assert_matches::assert_matches;
use botconnector::schema::Activity;
use botconnector::{Error, TeamsInfo};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_members_in_team_scope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/conversations/19%3Ateam%40thread.tacv2/members"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("conversation_members")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let activity = common::teams_activity(&mock_server.uri());
    let members = TeamsInfo::new(&client, &activity)
        .get_members()
        .await
        .unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].given_name.as_deref(), Some("Ada"));
    assert_eq!(members[0].email.as_deref(), Some("ada@example.com"));
    assert_eq!(members[1].user_role.as_deref(), Some("user"));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_get_paged_members_outside_team_uses_conversation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/conversations/a%3Apersonal/pagedmembers"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "members": [{ "id": "29:user", "email": "ada@example.com" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let activity = common::personal_activity(&mock_server.uri());
    let page = TeamsInfo::new(&client, &activity)
        .get_paged_members(None, Some(10))
        .await
        .unwrap();

    assert!(page.continuation_token.is_none());
    assert_eq!(page.members[0].email.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn test_get_member() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/conversations/19%3Ateam%40thread.tacv2/members/29%3Auser-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "29:user-1",
            "userPrincipalName": "ada@example.com"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let activity = common::teams_activity(&mock_server.uri());
    let member = TeamsInfo::new(&client, &activity)
        .get_member("29:user-1")
        .await
        .unwrap();

    assert_eq!(member.user_principal_name.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn test_team_only_methods_fail_outside_team() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let activity = common::personal_activity(&mock_server.uri());
    let info = TeamsInfo::new(&client, &activity);

    assert_eq!(info.get_team_id(), None);
    assert_matches!(
        info.get_team_details(None).await,
        Err(Error::InvalidArgument(msg)) if msg.contains("scope of MS Teams Team")
    );
    assert_matches!(info.get_team_channels(None).await, Err(Error::InvalidArgument(_)));
    assert_matches!(info.get_team_members(None).await, Err(Error::InvalidArgument(_)));
    assert_matches!(
        info.get_paged_team_members(None, None, None).await,
        Err(Error::InvalidArgument(_))
    );
    assert_matches!(
        info.get_team_member(None, "29:x").await,
        Err(Error::InvalidArgument(_))
    );

    mock_server.verify().await;
}

#[tokio::test]
async fn test_meeting_participant_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/meetings/meeting-1/participants/aad-1"))
        .and(query_param("tenantId", "tenant-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("meeting_participant")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let activity = common::teams_activity(&mock_server.uri());
    let participant = TeamsInfo::new(&client, &activity)
        .get_meeting_participant(None, None, None)
        .await
        .unwrap();

    assert_eq!(
        participant.meeting.unwrap().role.as_deref(),
        Some("Organizer")
    );
    mock_server.verify().await;
}

#[tokio::test]
async fn test_team_details_explicit_id_overrides_activity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/teams/19%3Aother"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "19:other",
            "name": "Other"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let activity = common::teams_activity(&mock_server.uri());
    let details = TeamsInfo::new(&client, &activity)
        .get_team_details(Some("19:other"))
        .await
        .unwrap();

    assert_eq!(details.name.as_deref(), Some("Other"));
}

#[tokio::test]
async fn test_send_message_to_teams_channel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/conversations"))
        .and(body_partial_json(serde_json::json!({
            "isGroup": true,
            "bot": { "id": "app-id" },
            "channelData": { "channel": { "id": "19:chan@thread.tacv2" } },
            "activity": { "type": "message", "text": "new thread" },
            "tenantId": "tenant-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "19:chan@thread.tacv2;messageid=42",
            "activityId": "42"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let activity = common::teams_activity(&mock_server.uri());
    let (reference, activity_id) = TeamsInfo::new(&client, &activity)
        .send_message_to_teams_channel(
            &Activity::message("new thread"),
            "19:chan@thread.tacv2",
            Some("app-id"),
        )
        .await
        .unwrap();

    assert_eq!(activity_id, "42");
    assert_eq!(reference.activity_id.as_deref(), Some("42"));
    assert_eq!(
        reference.conversation.unwrap().id.as_deref(),
        Some("19:chan@thread.tacv2;messageid=42")
    );
    assert_eq!(reference.channel_id.as_deref(), Some("msteams"));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_batch_pass_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/batch/conversation/tenant/"))
        .and(body_partial_json(serde_json::json!({ "TenantId": "tenant-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json("op-1"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let activity = common::teams_activity(&mock_server.uri());
    let operation_id = TeamsInfo::new(&client, &activity)
        .send_message_to_all_users_in_tenant(&Activity::message("all hands"), "tenant-1")
        .await
        .unwrap();

    assert_eq!(operation_id, "op-1");
}
