//! Offline-first repositories
//!
//! Each repository serves reads straight from the local store and pulls
//! remote changes in through [`change_list_sync`](newswire_core::sync::change_list_sync),
//! one collection per repository. Repositories never write local edits back
//! to the network; the remote catalog is the single source of truth and the
//! local store converges on it.

mod authors;
mod news;
mod topics;

pub use authors::OfflineFirstAuthorsRepository;
pub use news::OfflineFirstNewsRepository;
pub use topics::OfflineFirstTopicsRepository;
