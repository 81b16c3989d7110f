//! User repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use momentos_core::error::{AppError, ErrorKind};
use momentos_core::result::AppResult;
use momentos_core::types::pagination::{PageRequest, PageResponse};
use momentos_entity::moment::like_pattern;
use momentos_entity::user::{CreateUser, UpdateProfile, User, UserSummary, UserWithStats};

/// Profile counters computed alongside the user row.
const STATS_SELECT: &str = "SELECT u.*, \
        (SELECT COUNT(*) FROM moments m WHERE m.user_id = u.id) AS total_moments, \
        (SELECT COUNT(*) FROM likes l JOIN moments m ON m.id = l.moment_id \
          WHERE m.user_id = u.id) AS total_likes_received \
     FROM users u";

/// Repository for accounts, profile data, and password-reset state.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Load a user with moment and like counters.
    pub async fn find_with_stats(&self, id: Uuid) -> AppResult<Option<UserWithStats>> {
        sqlx::query_as::<_, UserWithStats>(&format!("{STATS_SELECT} WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user stats", e))
    }

    /// Load a user with counters by username (case-insensitive).
    pub async fn find_with_stats_by_username(
        &self,
        username: &str,
    ) -> AppResult<Option<UserWithStats>> {
        sqlx::query_as::<_, UserWithStats>(&format!(
            "{STATS_SELECT} WHERE LOWER(u.username) = LOWER($1)"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user stats", e))
    }

    /// Search users whose username contains `query` (case-insensitive).
    pub async fn search_by_username(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<UserSummary>> {
        let pattern = like_pattern(query);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count search results", e)
            })?;

        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, username, first_name, last_name, avatar FROM users \
             WHERE username ILIKE $1 ORDER BY username ASC LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search users", e))?;

        Ok(PageResponse::new(users, page.page, page.page_size, total as u64))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_lower_key") =>
            {
                AppError::field("username", "A user with that username already exists")
                    .with_kind(ErrorKind::Conflict)
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_email_lower_key") =>
            {
                AppError::field("email", "A user with that email already exists")
                    .with_kind(ErrorKind::Conflict)
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Apply a partial profile update.
    pub async fn update_profile(&self, id: Uuid, data: &UpdateProfile) -> AppResult<User> {
        let (set_birth_date, birth_date) = match data.birth_date {
            Some(value) => (true, value),
            None => (false, None),
        };

        sqlx::query_as::<_, User>(
            "UPDATE users SET first_name = COALESCE($2, first_name), \
                              last_name = COALESCE($3, last_name), \
                              avatar = COALESCE($4, avatar), \
                              bio = COALESCE($5, bio), \
                              birth_date = CASE WHEN $6 THEN $7 ELSE birth_date END, \
                              is_private = COALESCE($8, is_private), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.avatar)
        .bind(&data.bio)
        .bind(set_birth_date)
        .bind(birth_date)
        .bind(data.is_private)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Update last login timestamp.
    pub async fn update_last_login(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }

    /// Store a freshly issued reset code, replacing any previous one and
    /// zeroing the attempt counter.
    pub async fn store_reset_code(
        &self,
        user_id: Uuid,
        code: &str,
        sent_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET reset_code = $2, reset_code_sent_at = $3, reset_attempts = 0 \
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(code)
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store reset code", e))?;
        Ok(())
    }

    /// Count one more mismatched reset attempt, returning the new total.
    pub async fn increment_reset_attempts(&self, user_id: Uuid) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            "UPDATE users SET reset_attempts = reset_attempts + 1 \
             WHERE id = $1 RETURNING reset_attempts",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count reset attempt", e)
        })
    }

    /// Zero the reset attempt counter after a successful verification.
    pub async fn reset_reset_attempts(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET reset_attempts = 0 WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to reset attempt counter", e)
            })?;
        Ok(())
    }

    /// Forget any outstanding reset code.
    pub async fn clear_reset_code(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET reset_code = NULL, reset_code_sent_at = NULL, reset_attempts = 0 \
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear reset code", e))?;
        Ok(())
    }

    /// Store a new password hash and clear the reset code in one statement.
    pub async fn complete_password_reset(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, reset_code = NULL, reset_code_sent_at = NULL, \
                              reset_attempts = 0, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }
}
