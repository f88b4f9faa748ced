//! SQLite implementation of the `AuthorStore` port

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use newswire_core::domain::Author;
use newswire_core::ports::AuthorStore;

use crate::id_placeholders;

/// SQLite-backed author storage
pub struct SqliteAuthorStore {
    pool: SqlitePool,
}

impl SqliteAuthorStore {
    /// Creates a new store instance with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn author_from_row(row: &SqliteRow) -> Author {
    Author {
        id: row.get("id"),
        name: row.get("name"),
        image_url: row.get("image_url"),
        twitter: row.get("twitter"),
        medium_page: row.get("medium_page"),
        bio: row.get("bio"),
    }
}

#[async_trait::async_trait]
impl AuthorStore for SqliteAuthorStore {
    async fn upsert_authors(&self, authors: &[Author]) -> anyhow::Result<()> {
        for author in authors {
            sqlx::query(
                "INSERT INTO authors \
                 (id, name, image_url, twitter, medium_page, bio) \
                 VALUES (?, ?, ?, ?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET \
                 name = excluded.name, \
                 image_url = excluded.image_url, \
                 twitter = excluded.twitter, \
                 medium_page = excluded.medium_page, \
                 bio = excluded.bio",
            )
            .bind(&author.id)
            .bind(&author.name)
            .bind(&author.image_url)
            .bind(&author.twitter)
            .bind(&author.medium_page)
            .bind(&author.bio)
            .execute(&self.pool)
            .await?;
        }

        tracing::trace!(count = authors.len(), "Upserted authors");
        Ok(())
    }

    async fn insert_or_ignore_authors(&self, authors: &[Author]) -> anyhow::Result<()> {
        for author in authors {
            sqlx::query(
                "INSERT OR IGNORE INTO authors \
                 (id, name, image_url, twitter, medium_page, bio) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&author.id)
            .bind(&author.name)
            .bind(&author.image_url)
            .bind(&author.twitter)
            .bind(&author.medium_page)
            .bind(&author.bio)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn delete_authors(&self, ids: &[String]) -> anyhow::Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let sql = format!(
            "DELETE FROM authors WHERE id IN ({})",
            id_placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        query.execute(&self.pool).await?;

        tracing::trace!(count = ids.len(), "Deleted authors");
        Ok(())
    }

    async fn get_authors(&self) -> anyhow::Result<Vec<Author>> {
        let rows = sqlx::query("SELECT * FROM authors ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(author_from_row).collect())
    }

    async fn get_author(&self, id: &str) -> anyhow::Result<Option<Author>> {
        let row = sqlx::query("SELECT * FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(author_from_row))
    }
}
