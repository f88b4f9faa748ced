//! Composition root - wires adapters into repositories and the sync engine
//!
//! Every command goes through [`App::init`], so configuration, database, and
//! preferences handling behave identically across the CLI surface.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use newswire_api::NewsApiClient;
use newswire_core::config::Config;
use newswire_prefs::PreferencesStore;
use newswire_store::{DatabasePool, SqliteAuthorStore, SqliteNewsResourceStore, SqliteTopicStore};
use newswire_sync::{
    OfflineFirstAuthorsRepository, OfflineFirstNewsRepository, OfflineFirstTopicsRepository,
    SyncEngine,
};

/// Fully wired application state
pub struct App {
    pub config: Config,
    pub prefs: Arc<PreferencesStore>,
    pub topics: Arc<OfflineFirstTopicsRepository>,
    pub authors: Arc<OfflineFirstAuthorsRepository>,
    pub news: Arc<OfflineFirstNewsRepository>,
    pub engine: SyncEngine,
}

impl App {
    /// Loads configuration and opens every adapter
    pub async fn init(config_override: Option<&Path>) -> Result<Self> {
        let config_path = config_override
            .map(Path::to_path_buf)
            .unwrap_or_else(Config::default_path);
        let config = Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "Configuration loaded");

        let pool = DatabasePool::new(&config.storage.database_path)
            .await
            .context("Failed to open catalog database")?;

        let topic_store = Arc::new(SqliteTopicStore::new(pool.pool().clone()));
        let author_store = Arc::new(SqliteAuthorStore::new(pool.pool().clone()));
        let news_store = Arc::new(SqliteNewsResourceStore::new(pool.pool().clone()));

        let network = Arc::new(
            NewsApiClient::new(
                &config.api.base_url,
                Duration::from_secs(config.api.timeout_secs),
            )
            .context("Failed to build catalog API client")?,
        );

        let prefs = Arc::new(
            PreferencesStore::load(&config.storage.preferences_path)
                .await
                .context("Failed to load preferences")?,
        );

        let topics = Arc::new(OfflineFirstTopicsRepository::new(
            topic_store.clone(),
            network.clone(),
            prefs.clone(),
        ));
        let authors = Arc::new(OfflineFirstAuthorsRepository::new(
            author_store.clone(),
            network.clone(),
            prefs.clone(),
        ));
        let news = Arc::new(
            OfflineFirstNewsRepository::new(
                news_store,
                topic_store,
                author_store,
                network,
                prefs.clone(),
            )
            .with_batch_size(config.sync.batch_size),
        );

        let engine = SyncEngine::new(
            topics.clone(),
            authors.clone(),
            news.clone(),
            prefs.clone(),
        );

        Ok(Self {
            config,
            prefs,
            topics,
            authors,
            news,
            engine,
        })
    }

    /// Seconds between periodic sync passes, as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.sync.poll_interval_secs)
    }

    /// The config file actually in effect
    pub fn config_path(config_override: Option<&Path>) -> PathBuf {
        config_override
            .map(Path::to_path_buf)
            .unwrap_or_else(Config::default_path)
    }
}
