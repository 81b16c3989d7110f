//! Comment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use momentos_core::error::{AppError, ErrorKind};
use momentos_core::result::AppResult;
use momentos_entity::comment::{Comment, CommentWithAuthor};

const WITH_AUTHOR: &str = "SELECT c.*, u.username AS author_username, \
        u.first_name AS author_first_name, u.last_name AS author_last_name, \
        u.avatar AS author_avatar \
     FROM comments c JOIN users u ON u.id = c.user_id";

/// Repository for comments.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a bare comment row.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    /// Find a comment with its author.
    pub async fn find_with_author(&self, id: Uuid) -> AppResult<Option<CommentWithAuthor>> {
        sqlx::query_as::<_, CommentWithAuthor>(&format!("{WITH_AUTHOR} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load comment", e))
    }

    /// All comments on a moment, oldest first.
    pub async fn list_for_moment(&self, moment_id: Uuid) -> AppResult<Vec<CommentWithAuthor>> {
        sqlx::query_as::<_, CommentWithAuthor>(&format!(
            "{WITH_AUTHOR} WHERE c.moment_id = $1 ORDER BY c.created_at ASC, c.id ASC"
        ))
        .bind(moment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list comments", e))
    }

    /// Insert a comment.
    pub async fn create(&self, user_id: Uuid, moment_id: Uuid, text: &str) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (user_id, moment_id, text) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(moment_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create comment", e))
    }

    /// Replace a comment's text.
    pub async fn update_text(&self, id: Uuid, text: &str) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET text = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update comment", e))?
        .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))
    }

    /// Delete a comment.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete comment", e))?;
        Ok(result.rows_affected() > 0)
    }
}
