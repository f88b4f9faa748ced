//! SQLite implementation of the `TopicStore` port

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use newswire_core::domain::Topic;
use newswire_core::ports::TopicStore;

use crate::id_placeholders;

/// SQLite-backed topic storage
pub struct SqliteTopicStore {
    pool: SqlitePool,
}

impl SqliteTopicStore {
    /// Creates a new store instance with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn topic_from_row(row: &SqliteRow) -> Topic {
    Topic {
        id: row.get("id"),
        name: row.get("name"),
        short_description: row.get("short_description"),
        long_description: row.get("long_description"),
        url: row.get("url"),
        image_url: row.get("image_url"),
    }
}

#[async_trait::async_trait]
impl TopicStore for SqliteTopicStore {
    async fn upsert_topics(&self, topics: &[Topic]) -> anyhow::Result<()> {
        for topic in topics {
            sqlx::query(
                "INSERT INTO topics \
                 (id, name, short_description, long_description, url, image_url) \
                 VALUES (?, ?, ?, ?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET \
                 name = excluded.name, \
                 short_description = excluded.short_description, \
                 long_description = excluded.long_description, \
                 url = excluded.url, \
                 image_url = excluded.image_url",
            )
            .bind(&topic.id)
            .bind(&topic.name)
            .bind(&topic.short_description)
            .bind(&topic.long_description)
            .bind(&topic.url)
            .bind(&topic.image_url)
            .execute(&self.pool)
            .await?;
        }

        tracing::trace!(count = topics.len(), "Upserted topics");
        Ok(())
    }

    async fn insert_or_ignore_topics(&self, topics: &[Topic]) -> anyhow::Result<()> {
        for topic in topics {
            sqlx::query(
                "INSERT OR IGNORE INTO topics \
                 (id, name, short_description, long_description, url, image_url) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&topic.id)
            .bind(&topic.name)
            .bind(&topic.short_description)
            .bind(&topic.long_description)
            .bind(&topic.url)
            .bind(&topic.image_url)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn delete_topics(&self, ids: &[String]) -> anyhow::Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let sql = format!(
            "DELETE FROM topics WHERE id IN ({})",
            id_placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        query.execute(&self.pool).await?;

        tracing::trace!(count = ids.len(), "Deleted topics");
        Ok(())
    }

    async fn get_topics(&self) -> anyhow::Result<Vec<Topic>> {
        let rows = sqlx::query("SELECT * FROM topics ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(topic_from_row).collect())
    }

    async fn get_topic(&self, id: &str) -> anyhow::Result<Option<Topic>> {
        let row = sqlx::query("SELECT * FROM topics WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(topic_from_row))
    }
}
