//! Newswire Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Topic`, `Author`, `NewsResource`, `UserData`,
//!   `ChangeListVersions`
//! - **Port definitions** - Traits for adapters: `NewsNetwork`, `TopicStore`,
//!   `AuthorStore`, `NewsResourceStore`, `Synchronizer`
//! - **Change-list synchronizer** - The incremental sync orchestration in
//!   [`sync::change_list_sync`]
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure data types with no external dependencies.
//! Ports define trait interfaces that adapter crates implement. The
//! synchronizer orchestrates local and remote stores through closures supplied
//! by each repository.

pub mod config;
pub mod domain;
pub mod ports;
pub mod sync;
