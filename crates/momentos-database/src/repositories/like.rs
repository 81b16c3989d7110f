//! Like repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use momentos_core::error::{AppError, ErrorKind};
use momentos_core::result::AppResult;

/// Repository for likes. The `(user_id, moment_id)` unique constraint is
/// what keeps a user to one like per moment.
#[derive(Debug, Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    /// Create a new like repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a like. Returns `false` when it already existed.
    pub async fn create(&self, user_id: Uuid, moment_id: Uuid) -> AppResult<bool> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO likes (user_id, moment_id) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT likes_user_moment_key DO NOTHING RETURNING id",
        )
        .bind(user_id)
        .bind(moment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create like", e))?;
        Ok(inserted.is_some())
    }

    /// Remove a like. Returns `false` when there was none.
    pub async fn delete(&self, user_id: Uuid, moment_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND moment_id = $2")
            .bind(user_id)
            .bind(moment_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete like", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of likes on a moment.
    pub async fn count_for_moment(&self, moment_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE moment_id = $1")
            .bind(moment_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count likes", e))
    }
}
