//! Notification repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use momentos_core::error::{AppError, ErrorKind};
use momentos_core::result::AppResult;
use momentos_core::types::pagination::{PageRequest, PageResponse};
use momentos_entity::notification::{NewNotification, NotificationRow};

/// Repository for notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a notification, spreading its kind over the nullable columns.
    pub async fn create(&self, data: &NewNotification) -> AppResult<Uuid> {
        let kind = &data.kind;
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO notifications (recipient_id, kind, actor_id, moment_id, comment_id, views, message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(data.recipient_id)
        .bind(kind.notification_type())
        .bind(kind.actor_id())
        .bind(kind.moment_id())
        .bind(kind.comment_id())
        .bind(kind.views())
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))
    }

    /// List a user's notifications, newest first.
    pub async fn find_by_recipient(
        &self,
        recipient_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationRow>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE recipient_id = $1")
                .bind(recipient_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
                })?;

        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT n.*, a.username AS actor_username, m.title AS moment_title \
             FROM notifications n \
             LEFT JOIN users a ON a.id = n.actor_id \
             LEFT JOIN moments m ON m.id = n.moment_id \
             WHERE n.recipient_id = $1 \
             ORDER BY n.created_at DESC, n.id DESC LIMIT $2 OFFSET $3",
        )
        .bind(recipient_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))?;

        Ok(PageResponse::new(rows, page.page, page.page_size, total as u64))
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, recipient_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark every unread notification of a user as read.
    pub async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }
}
