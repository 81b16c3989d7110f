//! Notification listing and read-state management.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use momentos_core::error::AppError;
use momentos_core::types::pagination::{PageRequest, PageResponse};
use momentos_database::repositories::NotificationRepository;
use momentos_entity::notification::Notification;

use crate::context::RequestContext;

/// A page of notifications plus the caller's unread count.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationFeed {
    /// The requested page, newest first.
    #[serde(flatten)]
    pub page: PageResponse<Notification>,
    /// Unread notifications across all pages.
    pub unread_count: i64,
}

/// Manages the current user's notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Lists notifications for the current user.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<NotificationFeed, AppError> {
        let rows = self.notif_repo.find_by_recipient(ctx.user_id, &page).await?;

        let items = rows
            .items
            .into_iter()
            .map(Notification::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let page = PageResponse::new(items, rows.page, rows.page_size, rows.total_items);

        let unread_count = self.notif_repo.count_unread(ctx.user_id).await?;
        Ok(NotificationFeed { page, unread_count })
    }

    /// Marks all notifications as read for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        let updated = self.notif_repo.mark_all_read(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, updated, "Notifications marked read");
        Ok(updated)
    }
}
