//! Offline-first news resources repository
//!
//! News resources reference topics and authors by id, and the catalog gives
//! no ordering guarantee between collections: a news payload may arrive
//! before the topics it is tagged with. Shell rows are inserted for any
//! referenced id before the news upsert so the foreign keys hold; the real
//! rows replace the shells when their own collection syncs.

use std::sync::Arc;

use tokio::sync::watch;

use newswire_core::domain::{Author, NewsResource, Topic};
use newswire_core::ports::{AuthorStore, NewsNetwork, NewsQuery, NewsResourceStore, TopicStore};
use newswire_core::sync::{change_list_sync, Synchronizer};
use newswire_prefs::PreferencesStore;

/// Heuristic size for batching full-payload fetches during sync
///
/// Keeps individual request URLs and response bodies bounded when a change
/// list spans hundreds of resources.
pub const SYNC_BATCH_SIZE: usize = 40;

/// News resources backed by the local store, kept fresh by change-list sync
pub struct OfflineFirstNewsRepository {
    news_store: Arc<dyn NewsResourceStore>,
    topic_store: Arc<dyn TopicStore>,
    author_store: Arc<dyn AuthorStore>,
    network: Arc<dyn NewsNetwork>,
    prefs: Arc<PreferencesStore>,
    batch_size: usize,
    news_tx: watch::Sender<Vec<NewsResource>>,
}

impl OfflineFirstNewsRepository {
    pub fn new(
        news_store: Arc<dyn NewsResourceStore>,
        topic_store: Arc<dyn TopicStore>,
        author_store: Arc<dyn AuthorStore>,
        network: Arc<dyn NewsNetwork>,
        prefs: Arc<PreferencesStore>,
    ) -> Self {
        Self {
            news_store,
            topic_store,
            author_store,
            network,
            prefs,
            batch_size: SYNC_BATCH_SIZE,
            news_tx: watch::channel(Vec::new()).0,
        }
    }

    /// Subscribes to the news collection, refreshed after successful syncs
    pub fn watch_news_resources(&self) -> watch::Receiver<Vec<NewsResource>> {
        self.news_tx.subscribe()
    }

    /// Overrides the per-request batch size for sync fetches
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Locally known news resources matching `query`, newest first
    pub async fn get_news_resources(&self, query: &NewsQuery) -> anyhow::Result<Vec<NewsResource>> {
        self.news_store.get_news_resources(query).await
    }

    /// Bookmarks or unbookmarks a news resource
    pub async fn set_news_bookmarked(&self, news_id: &str, bookmarked: bool) -> anyhow::Result<()> {
        self.prefs.set_news_bookmarked(news_id, bookmarked).await?;
        Ok(())
    }

    /// Marks a news resource viewed or unviewed
    pub async fn set_news_viewed(&self, news_id: &str, viewed: bool) -> anyhow::Result<()> {
        let ids = [news_id.to_string()];
        self.prefs.set_news_viewed(&ids, viewed).await?;
        Ok(())
    }

    /// Runs one incremental sync pass for the news resources collection
    ///
    /// On the very first sync (cursor at or below zero) every fetched
    /// resource is marked viewed, so a fresh install does not present the
    /// entire back catalog as unread.
    pub async fn sync_with(&self, synchronizer: &dyn Synchronizer) -> bool {
        let is_first_sync = match synchronizer.change_list_versions().await {
            Ok(versions) => versions.news_resource_version <= 0,
            Err(error) => {
                tracing::warn!(%error, "Could not read sync versions");
                return false;
            }
        };

        let success = change_list_sync(
            synchronizer,
            |versions| versions.news_resource_version,
            |after| self.network.get_news_resource_change_list(after),
            |mut versions, latest| {
                versions.news_resource_version = latest;
                versions
            },
            |ids| async move { self.news_store.delete_news_resources(&ids).await },
            |ids| async move {
                for chunk in ids.chunks(self.batch_size) {
                    let resources = self.network.get_news_resources(chunk).await?;
                    self.insert_reference_shells(&resources).await?;
                    self.news_store.upsert_news_resources(&resources).await?;
                }

                if is_first_sync && !ids.is_empty() {
                    self.prefs.set_news_viewed(&ids, true).await?;
                }

                Ok(())
            },
        )
        .await;

        if success {
            if let Ok(resources) = self.news_store.get_news_resources(&NewsQuery::default()).await
            {
                let _ = self.news_tx.send(resources);
            }
        }
        success
    }

    /// Inserts placeholder topic and author rows for every id the resources
    /// reference
    async fn insert_reference_shells(&self, resources: &[NewsResource]) -> anyhow::Result<()> {
        let topic_shells: Vec<Topic> = resources
            .iter()
            .flat_map(|r| r.topic_ids.iter())
            .map(Topic::shell)
            .collect();
        let author_shells: Vec<Author> = resources
            .iter()
            .flat_map(|r| r.author_ids.iter())
            .map(Author::shell)
            .collect();

        self.topic_store.insert_or_ignore_topics(&topic_shells).await?;
        self.author_store
            .insert_or_ignore_authors(&author_shells)
            .await?;
        Ok(())
    }
}
