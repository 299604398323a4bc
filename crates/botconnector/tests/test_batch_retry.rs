//! Batch messaging under the throttle retry policy

mod common;

use assert_matches::assert_matches;
use botconnector::schema::{Activity, TeamMember};
use botconnector::{CancellationToken, Client, Error};
use std::time::{Duration, Instant};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_throttled_then_accepted_returns_operation_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/batch/conversation/users/"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/batch/conversation/users/"))
        .and(body_partial_json(serde_json::json!({
            "Members": [{ "id": "29:a" }, { "id": "29:b" }],
            "Activity": { "type": "message", "text": "hello" },
            "TenantId": "tenant-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json("op-123"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let operation_id = client
        .teams()
        .send_message_to_list_of_users(
            &Activity::message("hello"),
            &[TeamMember::new("29:a"), TeamMember::new("29:b")],
            "tenant-1",
        )
        .await
        .expect("batch send failed");

    assert_eq!(operation_id, "op-123");
    mock_server.verify().await;
}

#[tokio::test]
async fn test_bad_request_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/batch/conversation/tenant/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": "BadSyntax", "message": "Activity is invalid" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let result = client
        .teams()
        .send_message_to_all_users_in_tenant(&Activity::message("hi"), "tenant-1")
        .await;

    assert_matches!(
        result,
        Err(Error::BadRequest { message, code })
            if message == "Activity is invalid" && code.as_deref() == Some("BadSyntax")
    );
    mock_server.verify().await;
}

#[tokio::test]
async fn test_retry_after_is_honoured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/batch/conversation/team/"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/batch/conversation/team/"))
        .and(body_partial_json(serde_json::json!({
            "TeamId": "19:team",
            "TenantId": "tenant-1"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({ "operationId": "op-9" })),
        )
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let started = Instant::now();
    let operation_id = client
        .teams()
        .send_message_to_all_users_in_team(&Activity::message("hi"), "19:team", "tenant-1")
        .await
        .unwrap();

    assert_eq!(operation_id, "op-9");
    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(request_count(&mock_server).await, 2);
}

#[tokio::test]
async fn test_persistent_throttling_gives_up_after_max_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/batch/conversation/op-1"))
        .respond_with(ResponseTemplate::new(429).insert_header("x-ms-request-id", "req-7"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .service_url(mock_server.uri())
        .max_retries(2)
        .back_off(Duration::from_millis(1))
        .build()
        .unwrap();

    let result = client.teams().get_operation_state("op-1").await;

    assert_matches!(
        result,
        Err(Error::Throttled { retry_after: None, request_id: Some(id) }) if id == "req-7"
    );
    mock_server.verify().await;
}

#[tokio::test]
async fn test_zero_retry_after_respects_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/batch/conversation/op-1"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .service_url(mock_server.uri())
        .retry_after_limit(3)
        .build()
        .unwrap();

    let result = client.teams().get_operation_state("op-1").await;

    assert_matches!(
        result,
        Err(Error::Throttled { retry_after: Some(delay), .. }) if delay == Duration::ZERO
    );
    mock_server.verify().await;
}

#[tokio::test]
async fn test_cancel_during_back_off() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/batch/conversation/channels/"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "5"))
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let result = client
        .teams()
        .with_cancellation(token)
        .send_message_to_list_of_channels(
            &Activity::message("hi"),
            &[TeamMember::new("19:chan")],
            "tenant-1",
        )
        .await;

    assert_matches!(result, Err(Error::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_already_cancelled_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let token = CancellationToken::new();
    token.cancel();

    let result = client
        .teams()
        .with_cancellation(token)
        .cancel_operation("op-1")
        .await;

    assert_matches!(result, Err(Error::Cancelled));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_operation_state_and_failed_entries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/batch/conversation/op-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("operation_state")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/batch/conversation/failedentries/op-1"))
        .and(query_param("continuationToken", "page-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("failed_entries")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/batch/conversation/op-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let teams = client.teams();

    let state = teams.get_operation_state("op-1").await.unwrap();
    assert_eq!(state.state.as_deref(), Some("Completed"));
    assert_eq!(state.status_map.get(&201), Some(&10));
    assert_eq!(state.total_entries_count, 11);

    let failed = teams
        .get_paged_failed_entries("op-1", Some("page-1"))
        .await
        .unwrap();
    assert_eq!(failed.continuation_token.as_deref(), Some("page-2"));
    assert_eq!(failed.failed_entries[0].entry_id.as_deref(), Some("29:gone"));

    teams.cancel_operation("op-1").await.unwrap();
    mock_server.verify().await;
}

#[tokio::test]
async fn test_batch_validation_happens_before_any_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let teams = client.teams();
    let activity = Activity::message("hi");

    assert_matches!(
        teams.send_message_to_list_of_users(&activity, &[], "tenant-1").await,
        Err(Error::InvalidArgument(msg)) if msg == "members cannot be empty."
    );
    assert_matches!(
        teams.send_message_to_all_users_in_tenant(&activity, "").await,
        Err(Error::InvalidArgument(msg)) if msg == "tenant_id is required."
    );
    assert_matches!(
        teams.send_message_to_all_users_in_team(&activity, "", "tenant-1").await,
        Err(Error::InvalidArgument(msg)) if msg == "team_id is required."
    );
    assert_matches!(
        teams.get_operation_state("").await,
        Err(Error::InvalidArgument(_))
    );

    mock_server.verify().await;
}
