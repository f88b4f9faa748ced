//! SQLite implementation of the `NewsResourceStore` port
//!
//! News resources span three tables: the `news_resources` row itself plus
//! the `news_resources_topics` and `news_resources_authors` cross references.
//! Upserting a resource replaces its cross-reference set; deleting a resource
//! removes the cross references via `ON DELETE CASCADE`.
//!
//! ## Type Mapping
//!
//! | Domain field       | SQL Type | Strategy                               |
//! |--------------------|----------|----------------------------------------|
//! | publish_date       | TEXT     | RFC 3339 via `to_rfc3339()` / parse    |
//! | resource_type      | TEXT     | wire tag string (unknown tags tolerated) |
//! | topic_ids/author_ids | —      | cross-reference rows, not columns      |

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use newswire_core::domain::{NewsResource, NewsResourceType};
use newswire_core::ports::{NewsQuery, NewsResourceStore};

use crate::{id_placeholders, StoreError};

/// SQLite-backed news resource storage
pub struct SqliteNewsResourceStore {
    pool: SqlitePool,
}

impl SqliteNewsResourceStore {
    /// Creates a new store instance with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Helper functions for type conversion
// ============================================================================

/// Serialize a NewsResourceType to its wire tag for storage
fn resource_type_to_string(resource_type: NewsResourceType) -> &'static str {
    match resource_type {
        NewsResourceType::Video => "Video",
        NewsResourceType::Article => "Article",
        NewsResourceType::ApiChange => "API change",
        NewsResourceType::Codelab => "Codelab",
        NewsResourceType::Dac => "DAC",
        NewsResourceType::Event => "Event",
        NewsResourceType::Unknown => "Unknown",
    }
}

/// Deserialize a NewsResourceType from its stored tag
///
/// Tags written by a newer schema fall back to `Unknown` rather than failing
/// the read.
fn resource_type_from_string(s: &str) -> NewsResourceType {
    match s {
        "Video" => NewsResourceType::Video,
        "Article" => NewsResourceType::Article,
        "API change" => NewsResourceType::ApiChange,
        "Codelab" => NewsResourceType::Codelab,
        "DAC" => NewsResourceType::Dac,
        "Event" => NewsResourceType::Event,
        _ => NewsResourceType::Unknown,
    }
}

/// Parse a DateTime<Utc> from an RFC 3339 string
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Decode(format!("Failed to parse datetime '{}': {}", s, e)))
}

/// Reconstruct a NewsResource from a database row, without its cross refs
///
/// The id lists are filled in afterwards from the cross-reference tables.
fn news_resource_from_row(row: &SqliteRow) -> Result<NewsResource, StoreError> {
    let publish_date_str: String = row.get("publish_date");
    let type_str: String = row.get("type");

    Ok(NewsResource {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        url: row.get("url"),
        header_image_url: row.get("header_image_url"),
        publish_date: parse_datetime(&publish_date_str)?,
        resource_type: resource_type_from_string(&type_str),
        topic_ids: Vec::new(),
        author_ids: Vec::new(),
    })
}

impl SqliteNewsResourceStore {
    /// Builds the filtered id-selection SQL shared by the two read paths
    ///
    /// Returns `None` when a filter is present but empty, which matches
    /// nothing by definition.
    fn build_filter(query: &NewsQuery, select: &str) -> Option<(String, Vec<String>)> {
        let mut sql = format!("SELECT {select} FROM news_resources WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(ref topic_ids) = query.filter_topic_ids {
            if topic_ids.is_empty() {
                return None;
            }
            sql.push_str(&format!(
                " AND id IN (SELECT news_resource_id FROM news_resources_topics \
                 WHERE topic_id IN ({}))",
                id_placeholders(topic_ids.len())
            ));
            binds.extend(topic_ids.iter().cloned());
        }

        if let Some(ref news_ids) = query.filter_news_ids {
            if news_ids.is_empty() {
                return None;
            }
            sql.push_str(&format!(
                " AND id IN ({})",
                id_placeholders(news_ids.len())
            ));
            binds.extend(news_ids.iter().cloned());
        }

        sql.push_str(" ORDER BY publish_date DESC");
        Some((sql, binds))
    }

    /// Loads the cross-reference id sets for the given resource ids
    async fn load_cross_refs(
        &self,
        table: &str,
        ref_column: &str,
        resource_ids: &[String],
    ) -> anyhow::Result<HashMap<String, Vec<String>>> {
        let mut refs: HashMap<String, Vec<String>> = HashMap::new();
        if resource_ids.is_empty() {
            return Ok(refs);
        }

        let sql = format!(
            "SELECT news_resource_id, {ref_column} FROM {table} \
             WHERE news_resource_id IN ({}) ORDER BY {ref_column} ASC",
            id_placeholders(resource_ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in resource_ids {
            query = query.bind(id);
        }

        for row in query.fetch_all(&self.pool).await? {
            let resource_id: String = row.get("news_resource_id");
            let ref_id: String = row.get(ref_column);
            refs.entry(resource_id).or_default().push(ref_id);
        }

        Ok(refs)
    }
}

#[async_trait::async_trait]
impl NewsResourceStore for SqliteNewsResourceStore {
    async fn upsert_news_resources(&self, resources: &[NewsResource]) -> anyhow::Result<()> {
        for resource in resources {
            sqlx::query(
                "INSERT INTO news_resources \
                 (id, title, content, url, header_image_url, publish_date, type) \
                 VALUES (?, ?, ?, ?, ?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET \
                 title = excluded.title, \
                 content = excluded.content, \
                 url = excluded.url, \
                 header_image_url = excluded.header_image_url, \
                 publish_date = excluded.publish_date, \
                 type = excluded.type",
            )
            .bind(&resource.id)
            .bind(&resource.title)
            .bind(&resource.content)
            .bind(&resource.url)
            .bind(&resource.header_image_url)
            .bind(resource.publish_date.to_rfc3339())
            .bind(resource_type_to_string(resource.resource_type))
            .execute(&self.pool)
            .await?;

            // Replace the cross-reference sets to match the new payload.
            sqlx::query("DELETE FROM news_resources_topics WHERE news_resource_id = ?")
                .bind(&resource.id)
                .execute(&self.pool)
                .await?;
            for topic_id in &resource.topic_ids {
                sqlx::query(
                    "INSERT OR IGNORE INTO news_resources_topics \
                     (news_resource_id, topic_id) VALUES (?, ?)",
                )
                .bind(&resource.id)
                .bind(topic_id)
                .execute(&self.pool)
                .await?;
            }

            sqlx::query("DELETE FROM news_resources_authors WHERE news_resource_id = ?")
                .bind(&resource.id)
                .execute(&self.pool)
                .await?;
            for author_id in &resource.author_ids {
                sqlx::query(
                    "INSERT OR IGNORE INTO news_resources_authors \
                     (news_resource_id, author_id) VALUES (?, ?)",
                )
                .bind(&resource.id)
                .bind(author_id)
                .execute(&self.pool)
                .await?;
            }
        }

        tracing::trace!(count = resources.len(), "Upserted news resources");
        Ok(())
    }

    async fn delete_news_resources(&self, ids: &[String]) -> anyhow::Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let sql = format!(
            "DELETE FROM news_resources WHERE id IN ({})",
            id_placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        query.execute(&self.pool).await?;

        tracing::trace!(count = ids.len(), "Deleted news resources");
        Ok(())
    }

    async fn get_news_resources(&self, query: &NewsQuery) -> anyhow::Result<Vec<NewsResource>> {
        let Some((sql, binds)) = Self::build_filter(query, "*") else {
            return Ok(Vec::new());
        };

        let mut sqlx_query = sqlx::query(&sql);
        for bind in &binds {
            sqlx_query = sqlx_query.bind(bind);
        }
        let rows = sqlx_query.fetch_all(&self.pool).await?;

        let mut resources = Vec::with_capacity(rows.len());
        for row in &rows {
            resources.push(news_resource_from_row(row)?);
        }

        let ids: Vec<String> = resources.iter().map(|r| r.id.clone()).collect();
        let mut topic_refs = self
            .load_cross_refs("news_resources_topics", "topic_id", &ids)
            .await?;
        let mut author_refs = self
            .load_cross_refs("news_resources_authors", "author_id", &ids)
            .await?;

        for resource in &mut resources {
            resource.topic_ids = topic_refs.remove(&resource.id).unwrap_or_default();
            resource.author_ids = author_refs.remove(&resource.id).unwrap_or_default();
        }

        Ok(resources)
    }

    async fn get_news_resource_ids(&self, query: &NewsQuery) -> anyhow::Result<Vec<String>> {
        let Some((sql, binds)) = Self::build_filter(query, "id") else {
            return Ok(Vec::new());
        };

        let mut sqlx_query = sqlx::query(&sql);
        for bind in &binds {
            sqlx_query = sqlx_query.bind(bind);
        }
        let rows = sqlx_query.fetch_all(&self.pool).await?;

        Ok(rows.iter().map(|row| row.get("id")).collect())
    }
}
