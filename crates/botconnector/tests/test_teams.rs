//! Teams team, meeting and notification endpoints

mod common;

use botconnector::schema::{MeetingNotification, MeetingSurface};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_team_details_and_channels() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/teams/19%3Ateam%40thread.tacv2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("team_details")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/teams/19%3Ateam%40thread.tacv2/conversations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("channel_list")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let details = client
        .teams()
        .fetch_team_details("19:team@thread.tacv2")
        .await
        .unwrap();
    assert_eq!(details.name.as_deref(), Some("Engineering"));
    assert_eq!(details.member_count, 37);
    assert_eq!(details.channel_count, 4);

    let channels = client
        .teams()
        .fetch_channel_list("19:team@thread.tacv2")
        .await
        .unwrap();
    assert_eq!(channels.conversations.len(), 2);
    assert_eq!(channels.conversations[1].name.as_deref(), Some("Releases"));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_fetch_participant() {
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
    let participant = client
        .teams()
        .fetch_participant("meeting-1", "aad-1", "tenant-1")
        .await
        .unwrap();

    let meeting = participant.meeting.unwrap();
    assert_eq!(meeting.role.as_deref(), Some("Organizer"));
    assert_eq!(meeting.in_meeting, Some(true));
    assert_eq!(
        participant.user.unwrap().email.as_deref(),
        Some("ada@example.com")
    );
}

#[tokio::test]
async fn test_fetch_meeting_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/meetings/meeting-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "details": {
                "id": "meeting-1",
                "title": "Standup",
                "joinUrl": "https://teams.example.com/join",
                "type": "Scheduled"
            },
            "conversation": { "id": "19:meeting@thread.v2", "isGroup": true },
            "organizer": { "id": "29:org", "aadObjectId": "aad-org" }
        })))
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let info = client.teams().fetch_meeting_info("meeting-1").await.unwrap();

    assert_eq!(info.details.unwrap().title.as_deref(), Some("Standup"));
    assert_eq!(
        info.organizer.unwrap().aad_object_id.as_deref(),
        Some("aad-org")
    );
}

fn notification() -> MeetingNotification {
    MeetingNotification::targeted(
        vec!["29:user".to_string()],
        vec![MeetingSurface {
            surface: "meetingStage".to_string(),
            content_type: Some("task".to_string()),
            content: Some(serde_json::json!({ "title": "Vote" })),
            tab_entity_id: None,
        }],
    )
}

#[tokio::test]
async fn test_meeting_notification_accepted_means_all_delivered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/meetings/meeting-1/notification"))
        .and(body_partial_json(serde_json::json!({
            "type": "targetedMeetingNotification",
            "value": { "recipients": ["29:user"] }
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let response = client
        .teams()
        .send_meeting_notification("meeting-1", &notification())
        .await
        .unwrap();

    assert!(response.is_none());
    mock_server.verify().await;
}

#[tokio::test]
async fn test_meeting_notification_partial_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/meetings/meeting-1/notification"))
        .respond_with(ResponseTemplate::new(207).set_body_json(serde_json::json!({
            "recipientsFailureInfo": [
                { "recipientMri": "29:user", "errorCode": "NotInMeeting", "failureReason": "left" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let response = client
        .teams()
        .send_meeting_notification("meeting-1", &notification())
        .await
        .unwrap()
        .expect("failure info");

    assert_eq!(response.recipients_failure_info.len(), 1);
    assert_eq!(
        response.recipients_failure_info[0].error_code.as_deref(),
        Some("NotInMeeting")
    );
}
