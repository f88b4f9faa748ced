//! Shared test helpers for catalog API integration tests
//!
//! Provides wiremock-based mock server setup. Each helper mounts the
//! necessary mock endpoints and returns a configured NewsApiClient pointing
//! at the mock server.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newswire_api::NewsApiClient;

/// Starts a mock server and a client pointed at it
pub async fn setup() -> (MockServer, NewsApiClient) {
    let server = MockServer::start().await;
    let client = NewsApiClient::new(&server.uri(), Duration::from_secs(5))
        .expect("Failed to build API client");
    (server, client)
}

/// Mounts an entity endpoint returning `items` inside the data envelope
pub async fn mount_entities(server: &MockServer, endpoint: &str, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{endpoint}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": items })),
        )
        .mount(server)
        .await;
}

/// Mounts a change-list endpoint returning `entries` as a bare array
pub async fn mount_change_list(server: &MockServer, collection: &str, entries: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/changelists/{collection}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(server)
        .await;
}
