//! HTTP client for the Newswire catalog API
//!
//! Wraps `reqwest::Client` with base URL construction and the response
//! envelope handling the catalog API uses. One client instance is shared per
//! process; `reqwest::Client` is internally reference-counted.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

use newswire_core::domain::{Author, NetworkChangeList, NewsResource, Topic};
use newswire_core::ports::NewsNetwork;

use crate::model::{
    NetworkAuthor, NetworkChangeListEntry, NetworkNewsResource, NetworkResponse, NetworkTopic,
};

/// HTTP implementation of the `NewsNetwork` port
pub struct NewsApiClient {
    client: Client,
    base_url: Url,
}

impl NewsApiClient {
    /// Creates a client for the given catalog base URL
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not a valid URL or the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid catalog base URL: {base_url}"))?;

        // Url::join treats a path without a trailing slash as a file and
        // would drop its last segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Builds an endpoint URL from a path and query pairs
    fn endpoint<'a, I>(&self, path: &str, query: I) -> Result<Url>
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let mut url = self
            .base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {path}"))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    /// Fetches entities from an envelope endpoint, filtered by ids
    ///
    /// Ids are passed as repeated `id=` query parameters; no ids means the
    /// whole collection.
    async fn get_entities<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        ids: &[String],
    ) -> Result<Vec<T>> {
        let url = self.endpoint(path, ids.iter().map(|id| ("id", id.clone())))?;

        tracing::debug!(%url, count = ids.len(), "Fetching entities");

        let response: NetworkResponse<Vec<T>> = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {path} failed"))?
            .error_for_status()
            .with_context(|| format!("Request to {path} returned an error status"))?
            .json()
            .await
            .with_context(|| format!("Failed to decode {path} response"))?;

        Ok(response.data)
    }

    /// Fetches a collection's change list past the `after` cursor
    ///
    /// The parameter is omitted entirely for cursors at or below zero, which
    /// the server treats as "from the beginning".
    async fn get_change_list(&self, collection: &str, after: i32) -> Result<Vec<NetworkChangeList>> {
        let path = format!("changelists/{collection}");
        let query = (after > 0).then(|| ("after", after.to_string()));
        let url = self.endpoint(&path, query)?;

        tracing::debug!(%url, after, "Fetching change list");

        let entries: Vec<NetworkChangeListEntry> = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Change list request for {collection} failed"))?
            .error_for_status()
            .with_context(|| format!("Change list request for {collection} returned an error"))?
            .json()
            .await
            .with_context(|| format!("Failed to decode {collection} change list"))?;

        Ok(entries.into_iter().map(Into::into).collect())
    }
}

#[async_trait::async_trait]
impl NewsNetwork for NewsApiClient {
    async fn get_topics(&self, ids: &[String]) -> Result<Vec<Topic>> {
        let topics: Vec<NetworkTopic> = self.get_entities("topics", ids).await?;
        Ok(topics.into_iter().map(Into::into).collect())
    }

    async fn get_authors(&self, ids: &[String]) -> Result<Vec<Author>> {
        let authors: Vec<NetworkAuthor> = self.get_entities("authors", ids).await?;
        Ok(authors.into_iter().map(Into::into).collect())
    }

    async fn get_news_resources(&self, ids: &[String]) -> Result<Vec<NewsResource>> {
        let resources: Vec<NetworkNewsResource> = self.get_entities("newsresources", ids).await?;
        Ok(resources.into_iter().map(Into::into).collect())
    }

    async fn get_topic_change_list(&self, after: i32) -> Result<Vec<NetworkChangeList>> {
        self.get_change_list("topics", after).await
    }

    async fn get_author_change_list(&self, after: i32) -> Result<Vec<NetworkChangeList>> {
        self.get_change_list("authors", after).await
    }

    async fn get_news_resource_change_list(&self, after: i32) -> Result<Vec<NetworkChangeList>> {
        self.get_change_list("newsresources", after).await
    }
}
