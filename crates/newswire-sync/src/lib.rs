//! Newswire Sync - Offline-first repositories and the sync engine
//!
//! Provides:
//! - Offline-first repositories for topics, authors, and news resources
//! - The [`engine::SyncEngine`] that runs periodic and on-demand sync passes
//!
//! ## Modules
//!
//! - [`repository`] - Reads served from the local store, writes arriving only
//!   through change-list sync
//! - [`engine`] - Serializes sync passes and drives the periodic loop

pub mod engine;
pub mod repository;

pub use engine::SyncEngine;
pub use repository::{
    OfflineFirstAuthorsRepository, OfflineFirstNewsRepository, OfflineFirstTopicsRepository,
};
