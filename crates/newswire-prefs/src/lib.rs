//! Newswire Prefs - User preferences and sync cursor persistence
//!
//! A single JSON file holds everything that is per-user rather than catalog
//! content:
//! - Followed topics and authors
//! - Bookmarked and viewed news resources
//! - The per-collection change-list version cursors
//!
//! ## Architecture
//!
//! [`PreferencesStore`] keeps the file's contents in memory behind a
//! `tokio::sync::RwLock` and rewrites the whole file on every mutation via a
//! temp-file-and-rename so a crash mid-write never leaves a truncated file.
//! It implements the `Synchronizer` port from `newswire-core`, which is how
//! the sync engine reads and advances the version cursors. Interested readers
//! observe user data through a `tokio::sync::watch` channel that replays the
//! latest snapshot to new subscribers.

pub mod store;

pub use store::PreferencesStore;

/// Errors that can occur while loading or saving the preferences file
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    /// Failed to read or write the preferences file
    #[error("Preferences I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The preferences file contains invalid JSON
    #[error("Failed to parse preferences file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
