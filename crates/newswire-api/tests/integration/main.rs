//! Integration tests for newswire-api
//!
//! Uses wiremock to simulate the catalog API and verifies end-to-end
//! behavior of the NewsApiClient: entity fetches, change-list queries,
//! and error handling.

mod common;

mod test_change_lists;
mod test_entities;
