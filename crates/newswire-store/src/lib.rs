//! Newswire Store - Local catalog persistence
//!
//! SQLite-based storage for the synced content catalog:
//! - Topics, authors, and news resources
//! - News/topic and news/author cross references
//!
//! ## Architecture
//!
//! This crate implements the `TopicStore`, `AuthorStore`, and
//! `NewsResourceStore` ports from `newswire-core` using SQLite as the storage
//! backend. It is a driven (secondary) adapter in the hexagonal architecture.
//! All mutations are idempotent upserts or deletes keyed by entity id, which
//! is what the change-list synchronizer relies on for crash-and-retry safety.
//!
//! ## Key Components
//!
//! - [`DatabasePool`] - Connection pool with migration support
//! - [`SqliteTopicStore`], [`SqliteAuthorStore`], [`SqliteNewsResourceStore`]
//! - [`StoreError`] - Error types for store operations

pub mod authors;
pub mod news;
pub mod pool;
pub mod topics;

pub use authors::SqliteAuthorStore;
pub use news::SqliteNewsResourceStore;
pub use pool::DatabasePool;
pub use topics::SqliteTopicStore;

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to establish a database connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A database query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be decoded into its domain type
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::QueryFailed(e.to_string())
    }
}

/// Builds a `?, ?, ...` placeholder list for an `IN (...)` clause
///
/// SQLite has no array bind type, so id-set queries interpolate one
/// placeholder per id and bind them individually.
pub(crate) fn id_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
