//! Writes notifications for likes, view milestones, and comments.
//!
//! Every method is fire-and-log: a failed insert is reported with
//! `tracing::warn!` and never propagates to the triggering request.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use momentos_database::repositories::NotificationRepository;
use momentos_entity::moment::Moment;
use momentos_entity::notification::{NewNotification, NotificationKind};

use super::messages;

/// Emits notifications on engagement events.
#[derive(Debug, Clone)]
pub struct Notifier {
    repo: Arc<NotificationRepository>,
}

impl Notifier {
    /// Creates a new notifier.
    pub fn new(repo: Arc<NotificationRepository>) -> Self {
        Self { repo }
    }

    /// `actor` liked `moment`. Self-likes produce nothing.
    pub async fn liked(&self, actor_id: Uuid, actor_username: &str, moment: &Moment) {
        if actor_id == moment.user_id {
            return;
        }
        self.dispatch(NewNotification {
            recipient_id: moment.user_id,
            kind: NotificationKind::Like {
                actor_id,
                moment_id: moment.id,
            },
            message: messages::liked(actor_username, &moment.title),
        })
        .await;
    }

    /// `moment` just reached `views`.
    pub async fn view_milestone(&self, moment: &Moment, views: i64) {
        self.dispatch(NewNotification {
            recipient_id: moment.user_id,
            kind: NotificationKind::ViewMilestone {
                moment_id: moment.id,
                views,
            },
            message: messages::view_milestone(&moment.title, views),
        })
        .await;
    }

    /// `actor` commented on `moment`. Comments on one's own moment produce nothing.
    pub async fn commented(
        &self,
        actor_id: Uuid,
        actor_username: &str,
        moment: &Moment,
        comment_id: Uuid,
    ) {
        if actor_id == moment.user_id {
            return;
        }
        self.dispatch(NewNotification {
            recipient_id: moment.user_id,
            kind: NotificationKind::Comment {
                actor_id,
                moment_id: moment.id,
                comment_id,
            },
            message: messages::commented(actor_username, &moment.title),
        })
        .await;
    }

    async fn dispatch(&self, notification: NewNotification) {
        let kind = notification.kind.notification_type();
        match self.repo.create(&notification).await {
            Ok(id) => debug!(
                notification_id = %id,
                recipient_id = %notification.recipient_id,
                ?kind,
                "Notification created"
            ),
            Err(e) => warn!(
                recipient_id = %notification.recipient_id,
                ?kind,
                error = %e,
                "Failed to create notification"
            ),
        }
    }
}
