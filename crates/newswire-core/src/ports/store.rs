//! Local store ports (driven/secondary ports)
//!
//! One trait per synced collection, mirroring the DAO surface the
//! repositories need. All mutations are idempotent and keyed by entity id:
//! upsert is insert-or-update, delete-by-ids ignores missing rows. That
//! idempotence is what makes crash-and-retry of a sync pass safe.

use crate::domain::{Author, NewsResource, Topic};

/// Local persistence for topics
#[async_trait::async_trait]
pub trait TopicStore: Send + Sync {
    /// Insert-or-update, keyed by id
    async fn upsert_topics(&self, topics: &[Topic]) -> anyhow::Result<()>;

    /// Insert rows that don't exist yet, leaving existing rows untouched
    ///
    /// Used for shell rows referenced by news resources ahead of the topic
    /// sync pass.
    async fn insert_or_ignore_topics(&self, topics: &[Topic]) -> anyhow::Result<()>;

    /// Delete by ids; missing ids are not an error
    async fn delete_topics(&self, ids: &[String]) -> anyhow::Result<()>;

    async fn get_topics(&self) -> anyhow::Result<Vec<Topic>>;

    async fn get_topic(&self, id: &str) -> anyhow::Result<Option<Topic>>;
}

/// Local persistence for authors
#[async_trait::async_trait]
pub trait AuthorStore: Send + Sync {
    async fn upsert_authors(&self, authors: &[Author]) -> anyhow::Result<()>;

    /// Shell-row variant, same role as [`TopicStore::insert_or_ignore_topics`]
    async fn insert_or_ignore_authors(&self, authors: &[Author]) -> anyhow::Result<()>;

    async fn delete_authors(&self, ids: &[String]) -> anyhow::Result<()>;

    async fn get_authors(&self) -> anyhow::Result<Vec<Author>>;

    async fn get_author(&self, id: &str) -> anyhow::Result<Option<Author>>;
}

/// Filter for news resource reads
///
/// `None` means "don't filter on this dimension"; `Some(empty)` matches
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct NewsQuery {
    /// Restrict to resources tagged with any of these topics
    pub filter_topic_ids: Option<Vec<String>>,
    /// Restrict to these resource ids
    pub filter_news_ids: Option<Vec<String>>,
}

/// Local persistence for news resources and their topic/author cross refs
#[async_trait::async_trait]
pub trait NewsResourceStore: Send + Sync {
    /// Insert-or-update news rows, keyed by id
    ///
    /// Callers must have inserted (shell) rows for every referenced topic and
    /// author first; upsert also replaces the resource's cross references.
    async fn upsert_news_resources(&self, resources: &[NewsResource]) -> anyhow::Result<()>;

    /// Delete by ids; cross references are removed with the rows
    async fn delete_news_resources(&self, ids: &[String]) -> anyhow::Result<()>;

    async fn get_news_resources(&self, query: &NewsQuery) -> anyhow::Result<Vec<NewsResource>>;

    /// Ids only, for set operations that don't need full payloads
    async fn get_news_resource_ids(&self, query: &NewsQuery) -> anyhow::Result<Vec<String>>;
}
