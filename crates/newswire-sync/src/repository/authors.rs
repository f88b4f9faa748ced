//! Offline-first authors repository

use std::sync::Arc;

use tokio::sync::watch;

use newswire_core::domain::Author;
use newswire_core::ports::{AuthorStore, NewsNetwork};
use newswire_core::sync::{change_list_sync, Synchronizer};
use newswire_prefs::PreferencesStore;

/// Authors backed by the local store, kept fresh by change-list sync
pub struct OfflineFirstAuthorsRepository {
    store: Arc<dyn AuthorStore>,
    network: Arc<dyn NewsNetwork>,
    prefs: Arc<PreferencesStore>,
    authors_tx: watch::Sender<Vec<Author>>,
}

impl OfflineFirstAuthorsRepository {
    pub fn new(
        store: Arc<dyn AuthorStore>,
        network: Arc<dyn NewsNetwork>,
        prefs: Arc<PreferencesStore>,
    ) -> Self {
        let (authors_tx, _) = watch::channel(Vec::new());
        Self {
            store,
            network,
            prefs,
            authors_tx,
        }
    }

    /// Follows or unfollows an author
    pub async fn set_author_followed(&self, author_id: &str, followed: bool) -> anyhow::Result<()> {
        self.prefs.set_author_followed(author_id, followed).await?;
        Ok(())
    }

    /// Subscribes to the author collection, refreshed after successful syncs
    pub fn watch_authors(&self) -> watch::Receiver<Vec<Author>> {
        self.authors_tx.subscribe()
    }

    /// All locally known authors, ordered by name
    pub async fn get_authors(&self) -> anyhow::Result<Vec<Author>> {
        self.store.get_authors().await
    }

    /// A single author by id, if known locally
    pub async fn get_author(&self, id: &str) -> anyhow::Result<Option<Author>> {
        self.store.get_author(id).await
    }

    /// Runs one incremental sync pass for the authors collection
    pub async fn sync_with(&self, synchronizer: &dyn Synchronizer) -> bool {
        let success = change_list_sync(
            synchronizer,
            |versions| versions.author_version,
            |after| self.network.get_author_change_list(after),
            |mut versions, latest| {
                versions.author_version = latest;
                versions
            },
            |ids| async move { self.store.delete_authors(&ids).await },
            |ids| async move {
                let authors = self.network.get_authors(&ids).await?;
                self.store.upsert_authors(&authors).await
            },
        )
        .await;

        if success {
            if let Ok(authors) = self.store.get_authors().await {
                let _ = self.authors_tx.send(authors);
            }
        }
        success
    }
}
