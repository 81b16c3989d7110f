//! Comment listing, posting, editing, and deletion.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use momentos_core::error::AppError;
use momentos_database::repositories::CommentRepository;
use momentos_entity::comment::{CommentWithAuthor, MAX_COMMENT_LENGTH};

use crate::context::RequestContext;
use crate::moment::MomentService;
use crate::notification::Notifier;

/// Handles comments.
#[derive(Debug, Clone)]
pub struct CommentService {
    comment_repo: Arc<CommentRepository>,
    moments: Arc<MomentService>,
    notifier: Arc<Notifier>,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comment_repo: Arc<CommentRepository>,
        moments: Arc<MomentService>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            comment_repo,
            moments,
            notifier,
        }
    }

    /// Comments on a visible moment, oldest first.
    pub async fn list(
        &self,
        moment_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Vec<CommentWithAuthor>, AppError> {
        self.moments.visible(moment_id, viewer).await?;
        self.comment_repo.list_for_moment(moment_id).await
    }

    /// Post a comment and notify the moment owner.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        moment_id: Uuid,
        text: &str,
    ) -> Result<CommentWithAuthor, AppError> {
        let text = clean_text(text)?;
        let moment = self.moments.visible(moment_id, Some(ctx.user_id)).await?;

        let comment = self
            .comment_repo
            .create(ctx.user_id, moment_id, &text)
            .await?;
        info!(comment_id = %comment.id, moment_id = %moment_id, user_id = %ctx.user_id, "Comment posted");

        self.notifier
            .commented(ctx.user_id, &ctx.username, &moment, comment.id)
            .await;

        self.load(comment.id).await
    }

    /// Edit a comment. Only its author may.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        comment_id: Uuid,
        text: &str,
    ) -> Result<CommentWithAuthor, AppError> {
        let text = clean_text(text)?;
        let comment = self.load(comment_id).await?;
        if !ctx.owns(comment.comment.user_id) {
            return Err(AppError::authorization(
                "You do not have permission to edit this comment",
            ));
        }

        self.comment_repo.update_text(comment_id, &text).await?;
        info!(comment_id = %comment_id, user_id = %ctx.user_id, "Comment edited");
        self.load(comment_id).await
    }

    /// Delete a comment. Its author or the moment owner may.
    pub async fn delete(&self, ctx: &RequestContext, comment_id: Uuid) -> Result<(), AppError> {
        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Comment {comment_id} not found")))?;

        if !ctx.owns(comment.user_id) {
            let moment = self
                .moments
                .visible(comment.moment_id, Some(ctx.user_id))
                .await?;
            if !ctx.owns(moment.user_id) {
                return Err(AppError::authorization(
                    "You do not have permission to delete this comment",
                ));
            }
        }

        self.comment_repo.delete(comment_id).await?;
        info!(comment_id = %comment_id, user_id = %ctx.user_id, "Comment deleted");
        Ok(())
    }

    async fn load(&self, comment_id: Uuid) -> Result<CommentWithAuthor, AppError> {
        self.comment_repo
            .find_with_author(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Comment {comment_id} not found")))
    }
}

fn clean_text(raw: &str) -> Result<String, AppError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(AppError::field("text", "This field may not be blank"));
    }
    if text.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::field(
            "text",
            format!("Ensure this field has no more than {MAX_COMMENT_LENGTH} characters"),
        ));
    }
    Ok(text.to_string())
}
