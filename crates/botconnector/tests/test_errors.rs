//! HTTP status to error mapping through real requests

mod common;

use assert_matches::assert_matches;
use botconnector::Error;
use botconnector::schema::Activity;
use rstest::rstest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[rstest]
#[case(401)]
#[case(403)]
#[case(404)]
#[case(409)]
#[case(500)]
#[case(503)]
#[case(418)]
#[tokio::test]
async fn test_status_maps_to_error(#[case] status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/conversations/a%3A1/members/29%3Ax"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "error": { "code": "Failure", "message": "nope" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let error = client
        .conversations()
        .get_conversation_member("a:1", "29:x")
        .await
        .unwrap_err();

    match status {
        401 => assert_matches!(error, Error::Authentication(msg) if msg == "nope"),
        403 => assert_matches!(error, Error::PermissionDenied(_)),
        404 => assert_matches!(error, Error::NotFound(_)),
        409 => assert_matches!(error, Error::Conflict(_)),
        500 | 503 => assert_matches!(error, Error::InternalServerError(_)),
        _ => assert_matches!(error, Error::ApiError { status: 418, .. }),
    }
    mock_server.verify().await;
}

#[tokio::test]
async fn test_throttling_outside_batch_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/conversations/a%3A1/activities"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "2"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let error = client
        .conversations()
        .send_to_conversation("a:1", &Activity::message("hi"))
        .await
        .unwrap_err();

    assert!(error.is_throttled());
    assert_eq!(error.retry_after(), Some(std::time::Duration::from_secs(2)));
    mock_server.verify().await;
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/teams/t"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let error = client.teams().fetch_team_details("t").await.unwrap_err();
    assert_matches!(error, Error::InternalServerError(msg) if msg == "upstream unavailable");
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/teams/t"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server);
    let error = client.teams().fetch_team_details("t").await.unwrap_err();
    assert_matches!(error, Error::ResponseValidation(_));
}

#[tokio::test]
async fn test_connection_refused() {
    let client = botconnector::Client::new("http://127.0.0.1:9/").unwrap();
    let error = client.teams().fetch_team_details("t").await.unwrap_err();
    assert_matches!(error, Error::Connection(_) | Error::Timeout(_));
}
