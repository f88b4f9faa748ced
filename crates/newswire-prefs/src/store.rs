//! JSON-file preferences store
//!
//! The file is small (a few id sets and three integers) so every mutation
//! serializes the full snapshot and swaps it into place atomically.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};

use newswire_core::domain::{ChangeListVersions, UserData};
use newswire_core::sync::{Synchronizer, VersionsUpdate};

use crate::PrefsError;

/// On-disk shape of the preferences file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PrefsData {
    #[serde(default)]
    versions: ChangeListVersions,
    #[serde(default)]
    user_data: UserData,
}

/// Persistent store for user preferences and sync version cursors
///
/// All mutations take the write lock, persist to disk, and publish the new
/// `UserData` snapshot before returning, so observers never see a state that
/// did not make it to disk.
pub struct PreferencesStore {
    path: PathBuf,
    data: RwLock<PrefsData>,
    user_data_tx: watch::Sender<UserData>,
}

impl PreferencesStore {
    /// Loads the store from `path`, starting from defaults if the file does
    /// not exist yet
    ///
    /// # Errors
    ///
    /// Returns `PrefsError::Io` if the file exists but cannot be read, or
    /// `PrefsError::Parse` if it holds invalid JSON. A missing file is not an
    /// error.
    pub async fn load(path: &Path) -> Result<Self, PrefsError> {
        let data = match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                serde_json::from_str::<PrefsData>(&contents).map_err(|e| PrefsError::Parse {
                    path: path.display().to_string(),
                    source: e,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No preferences file, starting fresh");
                PrefsData::default()
            }
            Err(e) => {
                return Err(PrefsError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let (user_data_tx, _) = watch::channel(data.user_data.clone());

        Ok(Self {
            path: path.to_path_buf(),
            data: RwLock::new(data),
            user_data_tx,
        })
    }

    /// Subscribes to user data changes
    ///
    /// The receiver immediately holds the current snapshot and is notified on
    /// every subsequent mutation.
    pub fn watch_user_data(&self) -> watch::Receiver<UserData> {
        self.user_data_tx.subscribe()
    }

    /// Returns the current user data snapshot
    pub async fn user_data(&self) -> UserData {
        self.data.read().await.user_data.clone()
    }

    /// Follows or unfollows a topic
    pub async fn set_topic_followed(&self, topic_id: &str, followed: bool) -> Result<(), PrefsError> {
        self.mutate_user_data(|user_data| {
            if followed {
                user_data.followed_topic_ids.insert(topic_id.to_string());
            } else {
                user_data.followed_topic_ids.remove(topic_id);
            }
        })
        .await
    }

    /// Follows or unfollows an author
    pub async fn set_author_followed(
        &self,
        author_id: &str,
        followed: bool,
    ) -> Result<(), PrefsError> {
        self.mutate_user_data(|user_data| {
            if followed {
                user_data.followed_author_ids.insert(author_id.to_string());
            } else {
                user_data.followed_author_ids.remove(author_id);
            }
        })
        .await
    }

    /// Bookmarks or unbookmarks a news resource
    pub async fn set_news_bookmarked(
        &self,
        news_id: &str,
        bookmarked: bool,
    ) -> Result<(), PrefsError> {
        self.mutate_user_data(|user_data| {
            if bookmarked {
                user_data.bookmarked_news_ids.insert(news_id.to_string());
            } else {
                user_data.bookmarked_news_ids.remove(news_id);
            }
        })
        .await
    }

    /// Marks a batch of news resources viewed or unviewed
    ///
    /// Batched because the first sync pass marks every pre-existing resource
    /// viewed in one call.
    pub async fn set_news_viewed(&self, news_ids: &[String], viewed: bool) -> Result<(), PrefsError> {
        self.mutate_user_data(|user_data| {
            for id in news_ids {
                if viewed {
                    user_data.viewed_news_ids.insert(id.clone());
                } else {
                    user_data.viewed_news_ids.remove(id);
                }
            }
        })
        .await
    }

    async fn mutate_user_data<F>(&self, mutate: F) -> Result<(), PrefsError>
    where
        F: FnOnce(&mut UserData),
    {
        let mut data = self.data.write().await;
        mutate(&mut data.user_data);
        self.persist(&data).await?;
        let _ = self.user_data_tx.send(data.user_data.clone());
        Ok(())
    }

    /// Writes the snapshot to a sibling temp file and renames it into place
    async fn persist(&self, data: &PrefsData) -> Result<(), PrefsError> {
        let io_err = |e: std::io::Error| PrefsError::Io {
            path: self.path.display().to_string(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(data).map_err(|e| PrefsError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json.as_bytes())
            .await
            .map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(io_err)?;

        tracing::trace!(path = %self.path.display(), "Preferences persisted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl Synchronizer for PreferencesStore {
    async fn change_list_versions(&self) -> anyhow::Result<ChangeListVersions> {
        Ok(self.data.read().await.versions)
    }

    async fn update_change_list_versions(&self, update: VersionsUpdate) -> anyhow::Result<()> {
        let mut data = self.data.write().await;
        data.versions = update(data.versions);
        self.persist(&data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("preferences.json")
    }

    #[tokio::test]
    async fn missing_file_starts_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::load(&prefs_path(&dir)).await.unwrap();

        assert_eq!(store.user_data().await, UserData::default());
        let versions = store.change_list_versions().await.unwrap();
        assert_eq!(versions.topic_version, 0);
    }

    #[tokio::test]
    async fn follow_state_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = prefs_path(&dir);

        let store = PreferencesStore::load(&path).await.unwrap();
        store.set_topic_followed("compose", true).await.unwrap();
        store.set_author_followed("a1", true).await.unwrap();
        store.set_news_bookmarked("n1", true).await.unwrap();
        drop(store);

        let reloaded = PreferencesStore::load(&path).await.unwrap();
        let user_data = reloaded.user_data().await;
        assert!(user_data.followed_topic_ids.contains("compose"));
        assert!(user_data.followed_author_ids.contains("a1"));
        assert!(user_data.bookmarked_news_ids.contains("n1"));
        assert!(user_data.has_onboarded());
    }

    #[tokio::test]
    async fn unfollow_removes_the_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::load(&prefs_path(&dir)).await.unwrap();

        store.set_topic_followed("compose", true).await.unwrap();
        store.set_topic_followed("compose", false).await.unwrap();

        assert!(store.user_data().await.followed_topic_ids.is_empty());
    }

    #[tokio::test]
    async fn viewed_batch_applies_all_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::load(&prefs_path(&dir)).await.unwrap();

        let ids = vec!["n1".to_string(), "n2".to_string(), "n3".to_string()];
        store.set_news_viewed(&ids, true).await.unwrap();
        assert_eq!(store.user_data().await.viewed_news_ids.len(), 3);

        store.set_news_viewed(&ids[..1], false).await.unwrap();
        let user_data = store.user_data().await;
        assert!(!user_data.viewed_news_ids.contains("n1"));
        assert!(user_data.viewed_news_ids.contains("n2"));
    }

    #[tokio::test]
    async fn version_cursors_persist_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = prefs_path(&dir);

        let store = PreferencesStore::load(&path).await.unwrap();
        store
            .update_change_list_versions(Box::new(|mut versions| {
                versions.topic_version = 10;
                versions.news_resource_version = 7;
                versions
            }))
            .await
            .unwrap();
        drop(store);

        let reloaded = PreferencesStore::load(&path).await.unwrap();
        let versions = reloaded.change_list_versions().await.unwrap();
        assert_eq!(versions.topic_version, 10);
        assert_eq!(versions.author_version, 0);
        assert_eq!(versions.news_resource_version, 7);
    }

    #[tokio::test]
    async fn watchers_see_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::load(&prefs_path(&dir)).await.unwrap();

        let mut rx = store.watch_user_data();
        assert!(!rx.borrow().has_onboarded());

        store.set_topic_followed("compose", true).await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().followed_topic_ids.contains("compose"));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = prefs_path(&dir);
        std::fs::write(&path, "{ not json").unwrap();

        let result = PreferencesStore::load(&path).await;
        assert!(matches!(result, Err(PrefsError::Parse { .. })));
    }
}
