//! Integration tests for the entity endpoints
//!
//! Verifies envelope unwrapping, repeated id query parameters, DTO-to-domain
//! mapping, and error status handling.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newswire_core::domain::NewsResourceType;
use newswire_core::ports::NewsNetwork;

use crate::common;

#[tokio::test]
async fn test_get_topics_unwraps_envelope() {
    let (server, client) = common::setup().await;

    common::mount_entities(
        &server,
        "topics",
        serde_json::json!([
            {
                "id": "t1",
                "name": "Compose",
                "shortDescription": "UI toolkit",
                "longDescription": "Declarative UI toolkit",
                "url": "https://example.com/compose",
                "imageUrl": "https://example.com/compose.png"
            },
            {
                "id": "t2",
                "name": "Wear OS"
            }
        ]),
    )
    .await;

    let topics = client.get_topics(&[]).await.expect("Topic fetch failed");

    assert_eq!(topics.len(), 2);
    assert_eq!(topics[0].id, "t1");
    assert_eq!(topics[0].short_description, "UI toolkit");
    // Fields the server omits default to empty.
    assert!(topics[1].url.is_empty());
}

#[tokio::test]
async fn test_get_topics_passes_repeated_id_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/topics"))
        .and(query_param("id", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "id": "t1", "name": "Compose" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        newswire_api::NewsApiClient::new(&server.uri(), std::time::Duration::from_secs(5)).unwrap();

    let topics = client
        .get_topics(&["t1".to_string()])
        .await
        .expect("Topic fetch failed");
    assert_eq!(topics.len(), 1);
}

#[tokio::test]
async fn test_get_authors_maps_fields() {
    let (server, client) = common::setup().await;

    common::mount_entities(
        &server,
        "authors",
        serde_json::json!([
            {
                "id": "a1",
                "name": "Alex",
                "imageUrl": "",
                "twitter": "@alex",
                "mediumPage": "",
                "bio": "Writes about UI"
            }
        ]),
    )
    .await;

    let authors = client.get_authors(&[]).await.expect("Author fetch failed");
    assert_eq!(authors[0].twitter, "@alex");
    assert_eq!(authors[0].bio, "Writes about UI");
}

#[tokio::test]
async fn test_get_news_resources_maps_ids_and_type() {
    let (server, client) = common::setup().await;

    common::mount_entities(
        &server,
        "newsresources",
        serde_json::json!([
            {
                "id": "n1",
                "title": "Compose 1.7 is out",
                "content": "Lots of new stuff",
                "url": "https://example.com/n1",
                "headerImageUrl": "https://example.com/n1.png",
                "publishDate": "2026-08-01T12:00:00Z",
                "type": "DAC",
                "topics": ["t1", "t2"],
                "authors": ["a1"]
            }
        ]),
    )
    .await;

    let resources = client
        .get_news_resources(&[])
        .await
        .expect("News fetch failed");

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].resource_type, NewsResourceType::Dac);
    assert_eq!(resources[0].topic_ids, vec!["t1", "t2"]);
    assert_eq!(resources[0].author_ids, vec!["a1"]);
    assert_eq!(
        resources[0].header_image_url.as_deref(),
        Some("https://example.com/n1.png")
    );
}

#[tokio::test]
async fn test_server_error_is_propagated() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/topics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client.get_topics(&[]).await.is_err());
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let (server, client) = common::setup().await;

    Mock::given(method("GET"))
        .and(path("/authors"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(client.get_authors(&[]).await.is_err());
}
