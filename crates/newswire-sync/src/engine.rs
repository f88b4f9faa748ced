//! Sync engine - serializes sync passes and drives the periodic loop
//!
//! The engine owns the three repositories and runs their sync passes in a
//! fixed order. A single-flight mutex guarantees that no two passes overlap,
//! which the version-cursor protocol requires. The periodic loop also accepts
//! on-demand "sync now" requests and shuts down cleanly on cancellation.
//!
//! ## Flow
//!
//! ```text
//! interval tick ──┐
//!                 ├──→ sync_once() ──→ topics, authors, news
//! sync request ───┘         │
//!                     is_syncing watch
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio_util::sync::CancellationToken;

use newswire_core::sync::Synchronizer;

use crate::repository::{
    OfflineFirstAuthorsRepository, OfflineFirstNewsRepository, OfflineFirstTopicsRepository,
};

/// Handle for requesting an immediate sync pass from outside the loop
#[derive(Clone)]
pub struct SyncRequester {
    tx: mpsc::Sender<()>,
}

impl SyncRequester {
    /// Requests a sync pass; a no-op if one is already queued
    pub fn request_sync(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Orchestrates change-list sync across all collections
pub struct SyncEngine {
    topics: Arc<OfflineFirstTopicsRepository>,
    authors: Arc<OfflineFirstAuthorsRepository>,
    news: Arc<OfflineFirstNewsRepository>,
    synchronizer: Arc<dyn Synchronizer>,
    single_flight: Mutex<()>,
    is_syncing_tx: watch::Sender<bool>,
    request_tx: mpsc::Sender<()>,
    request_rx: Mutex<mpsc::Receiver<()>>,
}

impl SyncEngine {
    pub fn new(
        topics: Arc<OfflineFirstTopicsRepository>,
        authors: Arc<OfflineFirstAuthorsRepository>,
        news: Arc<OfflineFirstNewsRepository>,
        synchronizer: Arc<dyn Synchronizer>,
    ) -> Self {
        let (is_syncing_tx, _) = watch::channel(false);
        // Capacity 1: a queued request already covers any number of callers.
        let (request_tx, request_rx) = mpsc::channel(1);

        Self {
            topics,
            authors,
            news,
            synchronizer,
            single_flight: Mutex::new(()),
            is_syncing_tx,
            request_tx,
            request_rx: Mutex::new(request_rx),
        }
    }

    /// Subscribes to the syncing state
    ///
    /// The receiver holds `true` while a pass is in flight.
    pub fn watch_is_syncing(&self) -> watch::Receiver<bool> {
        self.is_syncing_tx.subscribe()
    }

    /// Returns a handle for triggering on-demand sync passes
    pub fn requester(&self) -> SyncRequester {
        SyncRequester {
            tx: self.request_tx.clone(),
        }
    }

    /// Runs one full sync pass across all collections
    ///
    /// Collections sync in dependency order so topic and author payloads
    /// land before the news resources that reference them where possible.
    /// Returns `true` only when every collection succeeded; a partial pass
    /// leaves the failed collections' cursors untouched and they catch up on
    /// the next pass.
    pub async fn sync_once(&self) -> bool {
        let _guard = self.single_flight.lock().await;
        let _ = self.is_syncing_tx.send(true);

        tracing::info!("Sync pass starting");

        let topics_ok = self.topics.sync_with(self.synchronizer.as_ref()).await;
        let authors_ok = self.authors.sync_with(self.synchronizer.as_ref()).await;
        let news_ok = self.news.sync_with(self.synchronizer.as_ref()).await;

        let success = topics_ok && authors_ok && news_ok;
        if success {
            tracing::info!("Sync pass completed");
        } else {
            tracing::warn!(topics_ok, authors_ok, news_ok, "Sync pass partially failed");
        }

        let _ = self.is_syncing_tx.send(false);
        success
    }

    /// Runs the periodic sync loop until cancelled
    ///
    /// Performs an immediate pass on startup, then one per `poll_interval`
    /// tick or on-demand request. Cancellation is observed between passes;
    /// a pass already in flight runs to completion.
    pub async fn run(&self, poll_interval: Duration, cancel: CancellationToken) {
        tracing::info!(interval_secs = poll_interval.as_secs(), "Sync engine starting");

        let mut request_rx = self.request_rx.lock().await;
        let mut ticker = tokio::time::interval(poll_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Sync engine shutting down");
                    break;
                }
                // First tick fires immediately, giving the startup pass.
                _ = ticker.tick() => {
                    self.sync_once().await;
                }
                Some(()) = request_rx.recv() => {
                    tracing::debug!("On-demand sync requested");
                    self.sync_once().await;
                }
            }
        }
    }
}
