//! Integration tests for the change-list endpoints
//!
//! Verifies the bare-array response shape, the `after` cursor parameter, and
//! its omission on first sync.

use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newswire_core::ports::NewsNetwork;

use crate::common;

#[tokio::test]
async fn test_change_list_parses_bare_array() {
    let (server, client) = common::setup().await;

    common::mount_change_list(
        &server,
        "topics",
        serde_json::json!([
            { "id": "t1", "changeListVersion": 1, "isDelete": false },
            { "id": "t2", "changeListVersion": 2, "isDelete": true }
        ]),
    )
    .await;

    let entries = client
        .get_topic_change_list(0)
        .await
        .expect("Change list fetch failed");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].change_list_version, 1);
    assert!(!entries[0].is_delete);
    assert!(entries[1].is_delete);
}

#[tokio::test]
async fn test_positive_cursor_is_sent_as_after_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/changelists/newsresources"))
        .and(query_param("after", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "n9", "changeListVersion": 8, "isDelete": false }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        newswire_api::NewsApiClient::new(&server.uri(), std::time::Duration::from_secs(5)).unwrap();

    let entries = client
        .get_news_resource_change_list(7)
        .await
        .expect("Change list fetch failed");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "n9");
}

#[tokio::test]
async fn test_zero_cursor_omits_after_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/changelists/authors"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        newswire_api::NewsApiClient::new(&server.uri(), std::time::Duration::from_secs(5)).unwrap();

    let entries = client
        .get_author_change_list(0)
        .await
        .expect("Change list fetch failed");
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_change_list_server_error_is_propagated() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/changelists/topics"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(client.get_topic_change_list(3).await.is_err());
}
