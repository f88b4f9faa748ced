//! Port definitions (trait interfaces) for adapter crates
//!
//! Ports use `anyhow::Result` because errors at port boundaries are
//! adapter-specific and don't need domain-level classification; the sync
//! layer only distinguishes success from failure.

pub mod network;
pub mod store;

pub use network::NewsNetwork;
pub use store::{AuthorStore, NewsQuery, NewsResourceStore, TopicStore};
