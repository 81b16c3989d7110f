//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use momentos_core::AppError;

use super::kind::{NotificationKind, NotificationType};

/// A notification row as stored, joined with the actor's username and
/// the moment's title for display.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NotificationRow {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Recipient (the moment owner).
    pub recipient_id: Uuid,
    /// Discriminant.
    pub kind: NotificationType,
    /// Acting user for likes and comments.
    pub actor_id: Option<Uuid>,
    /// Moment involved.
    pub moment_id: Option<Uuid>,
    /// Comment involved.
    pub comment_id: Option<Uuid>,
    /// View count for milestones.
    pub views: Option<i64>,
    /// Display text.
    pub message: String,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// When it was created.
    pub created_at: DateTime<Utc>,
    /// Acting user's login name.
    pub actor_username: Option<String>,
    /// Moment title.
    pub moment_title: Option<String>,
}

/// A notification as the application sees it.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Recipient.
    pub recipient_id: Uuid,
    /// What happened.
    #[serde(flatten)]
    pub kind: NotificationKind,
    /// Display text.
    pub message: String,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// When it was created.
    pub created_at: DateTime<Utc>,
    /// Acting user's login name.
    pub actor_username: Option<String>,
    /// Moment title.
    pub moment_title: Option<String>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = NotificationKind::from_columns(
            row.kind,
            row.actor_id,
            row.moment_id,
            row.comment_id,
            row.views,
        )
        .ok_or_else(|| {
            AppError::internal(format!(
                "Notification {} has columns inconsistent with kind {:?}",
                row.id, row.kind
            ))
        })?;

        Ok(Self {
            id: row.id,
            recipient_id: row.recipient_id,
            kind,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
            actor_username: row.actor_username,
            moment_title: row.moment_title,
        })
    }
}

/// A notification about to be inserted.
#[derive(Debug, Clone)]
pub struct NewNotification {
    /// Recipient.
    pub recipient_id: Uuid,
    /// What happened.
    pub kind: NotificationKind,
    /// Display text.
    pub message: String,
}
