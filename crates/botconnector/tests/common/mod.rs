//! Common test utilities and helpers

use botconnector::Client;
use botconnector::schema::Activity;
use std::path::Path;
use std::time::Duration;
use wiremock::MockServer;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Bearer token used by test clients
#[allow(dead_code)]
pub fn test_token() -> &'static str {
    "test-bearer-token"
}

/// A client pointed at the mock server, with a 1ms throttle back-off
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .service_url(server.uri())
        .auth_token(test_token())
        .back_off(Duration::from_millis(1))
        .build()
        .expect("Failed to build client")
}

/// An incoming Teams channel message
#[allow(dead_code)]
pub fn teams_activity(service_url: &str) -> Activity {
    serde_json::from_value(serde_json::json!({
        "type": "message",
        "id": "1700000000000",
        "serviceUrl": service_url,
        "channelId": "msteams",
        "from": { "id": "29:user", "name": "Ada", "aadObjectId": "aad-1" },
        "recipient": { "id": "28:bot", "name": "Bot" },
        "conversation": { "id": "19:chan@thread.tacv2", "conversationType": "channel" },
        "channelData": {
            "team": { "id": "19:team@thread.tacv2", "name": "Engineering" },
            "channel": { "id": "19:chan@thread.tacv2" },
            "tenant": { "id": "tenant-1" },
            "meeting": { "id": "meeting-1" }
        },
        "text": "hello"
    }))
    .expect("valid activity")
}

/// An incoming personal (1:1) message, outside any team
#[allow(dead_code)]
pub fn personal_activity(service_url: &str) -> Activity {
    serde_json::from_value(serde_json::json!({
        "type": "message",
        "serviceUrl": service_url,
        "channelId": "msteams",
        "from": { "id": "29:user", "aadObjectId": "aad-1" },
        "conversation": { "id": "a:personal", "conversationType": "personal" },
        "channelData": { "tenant": { "id": "tenant-1" } }
    }))
    .expect("valid activity")
}
