//! Newswire API - HTTP client for the remote catalog
//!
//! Implements the `NewsNetwork` port from `newswire-core` against the
//! Newswire catalog's REST API:
//!
//! - `GET /topics?id=...` / `/authors?id=...` / `/newsresources?id=...`
//!   return full entity payloads wrapped in a `{"data": [...]}` envelope
//! - `GET /changelists/{collection}?after=N` returns a bare JSON array of
//!   change-list entries with version greater than `N`, ascending
//!
//! ## Key Components
//!
//! - [`NewsApiClient`] - the port implementation, one per process
//! - [`model`] - wire DTOs, kept separate from the domain types

pub mod client;
pub mod model;

pub use client::NewsApiClient;
