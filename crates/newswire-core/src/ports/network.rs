//! Remote catalog port (driven/secondary port)
//!
//! Interface to the remote source of truth for the content catalog. The
//! primary implementation targets the Newswire catalog HTTP API, but the
//! trait is transport-agnostic; tests substitute an in-memory double.

use crate::domain::{Author, NetworkChangeList, NewsResource, Topic};

/// Port trait for the remote catalog
///
/// Entity fetches return full payloads for the requested ids; an empty id
/// slice means "all entities" and is only used for diagnostics, never by the
/// synchronizer. Change-list fetches take an exclusive `after` cursor: the
/// server returns entries with `change_list_version > after`, ordered by
/// ascending version.
///
/// Implementations own their timeout policy; the synchronizer treats any
/// error uniformly as a failed pass.
#[async_trait::async_trait]
pub trait NewsNetwork: Send + Sync {
    /// Fetches full topic payloads for the given ids
    async fn get_topics(&self, ids: &[String]) -> anyhow::Result<Vec<Topic>>;

    /// Fetches full author payloads for the given ids
    async fn get_authors(&self, ids: &[String]) -> anyhow::Result<Vec<Author>>;

    /// Fetches full news resource payloads for the given ids
    async fn get_news_resources(&self, ids: &[String]) -> anyhow::Result<Vec<NewsResource>>;

    /// Topic mutations with `change_list_version > after`
    async fn get_topic_change_list(&self, after: i32) -> anyhow::Result<Vec<NetworkChangeList>>;

    /// Author mutations with `change_list_version > after`
    async fn get_author_change_list(&self, after: i32) -> anyhow::Result<Vec<NetworkChangeList>>;

    /// News resource mutations with `change_list_version > after`
    async fn get_news_resource_change_list(
        &self,
        after: i32,
    ) -> anyhow::Result<Vec<NetworkChangeList>>;
}
