//! Likes and view counting, with their notification side effects.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use momentos_core::error::AppError;
use momentos_database::repositories::{LikeRepository, MomentRepository};
use momentos_entity::moment::reached_view_milestone;

use crate::context::RequestContext;
use crate::notification::Notifier;

use super::service::MomentService;

/// Result of a view request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewOutcome {
    /// View count after the request.
    pub views: i64,
    /// Whether this request was counted.
    pub counted: bool,
}

/// Handles likes and views.
#[derive(Debug, Clone)]
pub struct EngagementService {
    moments: Arc<MomentService>,
    moment_repo: Arc<MomentRepository>,
    like_repo: Arc<LikeRepository>,
    notifier: Arc<Notifier>,
    view_milestone: i64,
}

impl EngagementService {
    /// Creates a new engagement service.
    pub fn new(
        moments: Arc<MomentService>,
        moment_repo: Arc<MomentRepository>,
        like_repo: Arc<LikeRepository>,
        notifier: Arc<Notifier>,
        view_milestone: i64,
    ) -> Self {
        Self {
            moments,
            moment_repo,
            like_repo,
            notifier,
            view_milestone,
        }
    }

    /// Like a moment, returning the new like count.
    ///
    /// The unique (user, moment) constraint makes a repeated like a conflict.
    pub async fn like(&self, ctx: &RequestContext, moment_id: Uuid) -> Result<i64, AppError> {
        let moment = self.moments.visible(moment_id, Some(ctx.user_id)).await?;

        if !self.like_repo.create(ctx.user_id, moment_id).await? {
            return Err(AppError::conflict("You already liked this moment"));
        }
        info!(moment_id = %moment_id, user_id = %ctx.user_id, "Moment liked");

        self.notifier
            .liked(ctx.user_id, &ctx.username, &moment)
            .await;

        self.like_repo.count_for_moment(moment_id).await
    }

    /// Remove the caller's like, returning the new like count.
    pub async fn unlike(&self, ctx: &RequestContext, moment_id: Uuid) -> Result<i64, AppError> {
        self.moments.visible(moment_id, Some(ctx.user_id)).await?;

        if !self.like_repo.delete(ctx.user_id, moment_id).await? {
            return Err(AppError::validation("You have not liked this moment"));
        }
        info!(moment_id = %moment_id, user_id = %ctx.user_id, "Like removed");

        self.like_repo.count_for_moment(moment_id).await
    }

    /// Count a view unless it comes from the owner.
    ///
    /// The counter is bumped with a single atomic `UPDATE ... RETURNING`, so
    /// each request sees a distinct post-increment value and exactly one of
    /// them can equal the milestone.
    pub async fn view(&self, moment_id: Uuid, viewer: Option<Uuid>) -> Result<ViewOutcome, AppError> {
        let moment = self.moments.visible(moment_id, viewer).await?;

        if viewer == Some(moment.user_id) {
            debug!(moment_id = %moment_id, "Owner view not counted");
            return Ok(ViewOutcome {
                views: moment.views,
                counted: false,
            });
        }

        let views = self
            .moment_repo
            .increment_views(moment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Moment {moment_id} not found")))?;

        if reached_view_milestone(views, self.view_milestone) {
            info!(moment_id = %moment_id, views, "View milestone reached");
            self.notifier.view_milestone(&moment, views).await;
        }

        Ok(ViewOutcome {
            views,
            counted: true,
        })
    }
}
