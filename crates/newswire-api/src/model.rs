//! Wire DTOs for the Newswire catalog API
//!
//! The API speaks camelCase JSON; these types absorb that convention at the
//! edge so the domain types stay idiomatic. Conversions are infallible field
//! moves except for the ids, which pass through unchanged.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use newswire_core::domain::{Author, NetworkChangeList, NewsResource, NewsResourceType, Topic};

/// Envelope the entity endpoints wrap their payloads in
///
/// Change-list endpoints return bare arrays and do not use this.
#[derive(Debug, Deserialize)]
pub struct NetworkResponse<T> {
    pub data: T,
}

/// A topic as returned by `GET /topics`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTopic {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: String,
}

impl From<NetworkTopic> for Topic {
    fn from(t: NetworkTopic) -> Self {
        Topic {
            id: t.id,
            name: t.name,
            short_description: t.short_description,
            long_description: t.long_description,
            url: t.url,
            image_url: t.image_url,
        }
    }
}

/// An author as returned by `GET /authors`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAuthor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub medium_page: String,
    #[serde(default)]
    pub bio: String,
}

impl From<NetworkAuthor> for Author {
    fn from(a: NetworkAuthor) -> Self {
        Author {
            id: a.id,
            name: a.name,
            image_url: a.image_url,
            twitter: a.twitter,
            medium_page: a.medium_page,
            bio: a.bio,
        }
    }
}

/// A news resource as returned by `GET /newsresources`
///
/// `topics` and `authors` carry ids only; the full entities arrive through
/// their own collections.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNewsResource {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub header_image_url: Option<String>,
    pub publish_date: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub resource_type: NewsResourceType,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
}

impl From<NetworkNewsResource> for NewsResource {
    fn from(n: NetworkNewsResource) -> Self {
        NewsResource {
            id: n.id,
            title: n.title,
            content: n.content,
            url: n.url,
            header_image_url: n.header_image_url,
            publish_date: n.publish_date,
            resource_type: n.resource_type,
            topic_ids: n.topics,
            author_ids: n.authors,
        }
    }
}

/// A change-list entry as returned by `GET /changelists/{collection}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkChangeListEntry {
    pub id: String,
    pub change_list_version: i32,
    #[serde(default)]
    pub is_delete: bool,
}

impl From<NetworkChangeListEntry> for NetworkChangeList {
    fn from(e: NetworkChangeListEntry) -> Self {
        NetworkChangeList {
            id: e.id,
            change_list_version: e.change_list_version,
            is_delete: e.is_delete,
        }
    }
}
