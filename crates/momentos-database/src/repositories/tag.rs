//! Tag repository implementation.

use sqlx::PgPool;

use momentos_core::error::{AppError, ErrorKind};
use momentos_core::result::AppResult;
use momentos_entity::tag::{Tag, TagName};

/// Repository for tags.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every tag ordered by name.
    pub async fn list_all(&self) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT id, name, slug FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))
    }

    /// Fetch existing tags or create missing ones, preserving input order.
    ///
    /// A name whose slug is already taken by a different tag resolves to
    /// that tag.
    pub async fn get_or_create(&self, names: &[TagName]) -> AppResult<Vec<Tag>> {
        let mut tags = Vec::with_capacity(names.len());
        for tag in names {
            sqlx::query("INSERT INTO tags (name, slug) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                .bind(&tag.name)
                .bind(&tag.slug)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create tag", e))?;

            let stored = sqlx::query_as::<_, Tag>(
                "SELECT id, name, slug FROM tags WHERE name = $1 OR slug = $2 \
                 ORDER BY (name = $1) DESC LIMIT 1",
            )
            .bind(&tag.name)
            .bind(&tag.slug)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load tag", e))?;

            if !tags.iter().any(|t: &Tag| t.id == stored.id) {
                tags.push(stored);
            }
        }
        Ok(tags)
    }
}
