//! What a notification is about.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminant stored in the `notifications.kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Someone liked a moment.
    Like,
    /// A moment reached the view milestone.
    ViewMilestone,
    /// Someone commented on a moment.
    #[sqlx(rename = "comentario")]
    #[serde(rename = "comentario")]
    Comment,
}

/// A notification's payload. Each variant carries exactly the references
/// its type needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationKind {
    /// `actor_id` liked `moment_id`.
    Like {
        /// Who liked.
        actor_id: Uuid,
        /// The liked moment.
        moment_id: Uuid,
    },
    /// `moment_id` reached `views` views.
    ViewMilestone {
        /// The moment.
        moment_id: Uuid,
        /// View count at the milestone.
        views: i64,
    },
    /// `actor_id` commented `comment_id` on `moment_id`.
    #[serde(rename = "comentario")]
    Comment {
        /// Who commented.
        actor_id: Uuid,
        /// The moment commented on.
        moment_id: Uuid,
        /// The new comment.
        comment_id: Uuid,
    },
}

impl NotificationKind {
    /// The stored discriminant.
    pub fn notification_type(&self) -> NotificationType {
        match self {
            Self::Like { .. } => NotificationType::Like,
            Self::ViewMilestone { .. } => NotificationType::ViewMilestone,
            Self::Comment { .. } => NotificationType::Comment,
        }
    }

    /// The user whose action caused the notification, if any.
    pub fn actor_id(&self) -> Option<Uuid> {
        match self {
            Self::Like { actor_id, .. } | Self::Comment { actor_id, .. } => Some(*actor_id),
            Self::ViewMilestone { .. } => None,
        }
    }

    /// The moment involved.
    pub fn moment_id(&self) -> Uuid {
        match self {
            Self::Like { moment_id, .. }
            | Self::ViewMilestone { moment_id, .. }
            | Self::Comment { moment_id, .. } => *moment_id,
        }
    }

    /// The comment involved, if any.
    pub fn comment_id(&self) -> Option<Uuid> {
        match self {
            Self::Comment { comment_id, .. } => Some(*comment_id),
            _ => None,
        }
    }

    /// The milestone view count, if any.
    pub fn views(&self) -> Option<i64> {
        match self {
            Self::ViewMilestone { views, .. } => Some(*views),
            _ => None,
        }
    }

    /// Rebuild a kind from the nullable stored columns. Returns `None` when
    /// a column required by the type is missing.
    pub fn from_columns(
        kind: NotificationType,
        actor_id: Option<Uuid>,
        moment_id: Option<Uuid>,
        comment_id: Option<Uuid>,
        views: Option<i64>,
    ) -> Option<Self> {
        match kind {
            NotificationType::Like => Some(Self::Like {
                actor_id: actor_id?,
                moment_id: moment_id?,
            }),
            NotificationType::ViewMilestone => Some(Self::ViewMilestone {
                moment_id: moment_id?,
                views: views?,
            }),
            NotificationType::Comment => Some(Self::Comment {
                actor_id: actor_id?,
                moment_id: moment_id?,
                comment_id: comment_id?,
            }),
        }
    }
}
