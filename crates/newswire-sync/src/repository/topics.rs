//! Offline-first topics repository

use std::sync::Arc;

use tokio::sync::watch;

use newswire_core::domain::Topic;
use newswire_core::ports::{NewsNetwork, TopicStore};
use newswire_core::sync::{change_list_sync, Synchronizer};
use newswire_prefs::PreferencesStore;

/// Topics backed by the local store, kept fresh by change-list sync
pub struct OfflineFirstTopicsRepository {
    store: Arc<dyn TopicStore>,
    network: Arc<dyn NewsNetwork>,
    prefs: Arc<PreferencesStore>,
    topics_tx: watch::Sender<Vec<Topic>>,
}

impl OfflineFirstTopicsRepository {
    pub fn new(
        store: Arc<dyn TopicStore>,
        network: Arc<dyn NewsNetwork>,
        prefs: Arc<PreferencesStore>,
    ) -> Self {
        let (topics_tx, _) = watch::channel(Vec::new());
        Self {
            store,
            network,
            prefs,
            topics_tx,
        }
    }

    /// Follows or unfollows a topic
    pub async fn set_topic_followed(&self, topic_id: &str, followed: bool) -> anyhow::Result<()> {
        self.prefs.set_topic_followed(topic_id, followed).await?;
        Ok(())
    }

    /// Subscribes to the topic collection
    ///
    /// The receiver replays the latest snapshot and is refreshed after every
    /// successful sync pass.
    pub fn watch_topics(&self) -> watch::Receiver<Vec<Topic>> {
        self.topics_tx.subscribe()
    }

    /// All locally known topics, ordered by name
    pub async fn get_topics(&self) -> anyhow::Result<Vec<Topic>> {
        self.store.get_topics().await
    }

    /// A single topic by id, if known locally
    pub async fn get_topic(&self, id: &str) -> anyhow::Result<Option<Topic>> {
        self.store.get_topic(id).await
    }

    /// Runs one incremental sync pass for the topics collection
    pub async fn sync_with(&self, synchronizer: &dyn Synchronizer) -> bool {
        let success = change_list_sync(
            synchronizer,
            |versions| versions.topic_version,
            |after| self.network.get_topic_change_list(after),
            |mut versions, latest| {
                versions.topic_version = latest;
                versions
            },
            |ids| async move { self.store.delete_topics(&ids).await },
            |ids| async move {
                let topics = self.network.get_topics(&ids).await?;
                self.store.upsert_topics(&topics).await
            },
        )
        .await;

        if success {
            if let Ok(topics) = self.store.get_topics().await {
                let _ = self.topics_tx.send(topics);
            }
        }
        success
    }
}
