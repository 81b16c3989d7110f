//! Moment posting, feeds, detail, editing, and deletion.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use momentos_core::config::FeedConfig;
use momentos_core::error::AppError;
use momentos_core::types::pagination::{PageRequest, PageResponse};
use momentos_database::repositories::{CommentRepository, MomentRepository, TagRepository};
use momentos_entity::moment::{
    CreateMoment, FeedFilter, Moment, MomentListing, UpdateMoment, can_view,
};
use momentos_entity::tag::{Tag, TagName, MAX_TAG_LENGTH};
use momentos_storage::{MediaKind, MediaStore};

use crate::context::RequestContext;
use crate::upload::FileUpload;

use super::view::{MomentCard, MomentDetail, attach_tags};

/// Longest accepted title.
pub const MAX_TITLE_LENGTH: usize = 200;
/// Longest accepted description.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Data for posting a moment.
#[derive(Debug, Clone)]
pub struct NewMoment {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Raw tag names.
    pub tags: Vec<String>,
    /// Length in seconds.
    pub duration_seconds: i32,
    /// Hide from everyone but the owner.
    pub is_private: bool,
    /// Video file.
    pub video: FileUpload,
    /// Optional cover image.
    pub thumbnail: Option<FileUpload>,
}

/// Partial edit of a moment.
#[derive(Debug, Clone, Default)]
pub struct MomentChanges {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New privacy flag.
    pub is_private: Option<bool>,
    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
    /// Replacement cover image.
    pub thumbnail: Option<FileUpload>,
}

/// Handles moment CRUD and feed queries.
#[derive(Debug, Clone)]
pub struct MomentService {
    moment_repo: Arc<MomentRepository>,
    tag_repo: Arc<TagRepository>,
    comment_repo: Arc<CommentRepository>,
    media: Arc<MediaStore>,
    config: FeedConfig,
}

impl MomentService {
    /// Creates a new moment service.
    pub fn new(
        moment_repo: Arc<MomentRepository>,
        tag_repo: Arc<TagRepository>,
        comment_repo: Arc<CommentRepository>,
        media: Arc<MediaStore>,
        config: FeedConfig,
    ) -> Self {
        Self {
            moment_repo,
            tag_repo,
            comment_repo,
            media,
            config,
        }
    }

    /// Feed page size for `requested`, clamped to the configured maximum.
    pub fn page_request(&self, page: Option<u64>, requested: Option<u64>) -> PageRequest {
        let size = requested
            .unwrap_or(self.config.page_size)
            .clamp(1, self.config.max_page_size.max(1));
        PageRequest::new(page.unwrap_or(1), size)
    }

    /// Post a new moment owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, input: NewMoment) -> Result<MomentDetail, AppError> {
        let title = clean_title(&input.title)?;
        let description = clean_description(&input.description)?;
        let tags = parse_tags(&input.tags)?;
        if input.duration_seconds < 0 {
            return Err(AppError::field("duration", "Duration cannot be negative"));
        }

        // Validate both files before writing either.
        self.media.validate(
            MediaKind::Video,
            &input.video.filename,
            input.video.data.len() as u64,
        )?;
        if let Some(thumb) = &input.thumbnail {
            self.media
                .validate(MediaKind::Thumbnail, &thumb.filename, thumb.data.len() as u64)?;
        }

        let video = self
            .media
            .save(MediaKind::Video, &input.video.filename, input.video.data)
            .await?;
        let thumbnail = match input.thumbnail {
            Some(thumb) => match self
                .media
                .save(MediaKind::Thumbnail, &thumb.filename, thumb.data)
                .await
            {
                Ok(path) => Some(path),
                Err(e) => {
                    self.media.remove(&video).await;
                    return Err(e);
                }
            },
            None => None,
        };

        let data = CreateMoment {
            user_id: ctx.user_id,
            title,
            description,
            video: video.clone(),
            thumbnail: thumbnail.clone(),
            duration_seconds: input.duration_seconds,
            is_private: input.is_private,
        };

        let created = match self.store_tags(&tags).await {
            Ok(tag_ids) => self.moment_repo.create(&data, &tag_ids).await,
            Err(e) => Err(e),
        };
        let moment = match created {
            Ok(moment) => moment,
            Err(e) => {
                self.media.remove(&video).await;
                if let Some(thumb) = &thumbnail {
                    self.media.remove(thumb).await;
                }
                return Err(e);
            }
        };

        info!(moment_id = %moment.id, user_id = %ctx.user_id, "Moment created");
        self.detail(moment.id, Some(ctx.user_id)).await
    }

    /// Filtered, sorted, paginated feed of moments visible to `filter.viewer`.
    pub async fn feed(
        &self,
        filter: FeedFilter,
        page: PageRequest,
    ) -> Result<PageResponse<MomentCard>, AppError> {
        let filter = filter.normalized();
        let listings = self.moment_repo.feed(&filter, &page).await?;

        let ids: Vec<Uuid> = listings.items.iter().map(|l| l.moment.id).collect();
        let tags = self.moment_repo.tags_for(&ids).await?;

        let PageResponse {
            items,
            page,
            page_size,
            total_items,
            ..
        } = listings;
        Ok(PageResponse::new(
            attach_tags(items, tags),
            page,
            page_size,
            total_items,
        ))
    }

    /// Full moment with comments. Hidden moments are reported as missing.
    pub async fn detail(&self, id: Uuid, viewer: Option<Uuid>) -> Result<MomentDetail, AppError> {
        let listing = self.visible_listing(id, viewer).await?;
        let tags = self.moment_repo.tags_for(&[id]).await?;
        let comments = self.comment_repo.list_for_moment(id).await?;

        let card = attach_tags(vec![listing], tags)
            .pop()
            .ok_or_else(|| AppError::internal("Moment vanished while loading"))?;
        Ok(MomentDetail { card, comments })
    }

    /// Moments related to `id`: shared tags first, then newest.
    pub async fn suggestions(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<Vec<MomentCard>, AppError> {
        self.visible_listing(id, viewer).await?;
        let listings = self
            .moment_repo
            .suggestions(id, viewer, self.config.suggestions_limit)
            .await?;
        let ids: Vec<Uuid> = listings.iter().map(|l| l.moment.id).collect();
        let tags = self.moment_repo.tags_for(&ids).await?;
        Ok(attach_tags(listings, tags))
    }

    /// Edit a moment the caller owns.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: MomentChanges,
    ) -> Result<MomentDetail, AppError> {
        let existing = self.owned(ctx, id, "edit").await?;

        let title = changes.title.as_deref().map(clean_title).transpose()?;
        let description = changes
            .description
            .as_deref()
            .map(clean_description)
            .transpose()?;
        let tags = changes.tags.as_deref().map(parse_tags).transpose()?;

        let thumbnail = match changes.thumbnail {
            Some(thumb) => Some(
                self.media
                    .save(MediaKind::Thumbnail, &thumb.filename, thumb.data)
                    .await?,
            ),
            None => None,
        };

        let tag_ids = match &tags {
            Some(tags) => Some(self.store_tags(tags).await?),
            None => None,
        };

        let update = UpdateMoment {
            title,
            description,
            thumbnail: thumbnail.clone(),
            is_private: changes.is_private,
        };
        if let Err(e) = self.moment_repo.update(id, &update, tag_ids.as_deref()).await {
            if let Some(path) = &thumbnail {
                self.media.remove(path).await;
            }
            return Err(e);
        }

        if let (Some(_), Some(old)) = (&thumbnail, &existing.thumbnail) {
            self.media.remove(old).await;
        }

        info!(moment_id = %id, user_id = %ctx.user_id, "Moment updated");
        self.detail(id, Some(ctx.user_id)).await
    }

    /// Delete a moment the caller owns, with its files.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let moment = self.owned(ctx, id, "delete").await?;

        if !self.moment_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Moment {id} not found")));
        }
        self.media.remove(&moment.video).await;
        if let Some(thumb) = &moment.thumbnail {
            self.media.remove(thumb).await;
        }

        info!(moment_id = %id, user_id = %ctx.user_id, "Moment deleted");
        Ok(())
    }

    /// All tags, by name.
    pub async fn tags(&self) -> Result<Vec<Tag>, AppError> {
        self.tag_repo.list_all().await
    }

    /// A moment row visible to `viewer`, or not-found.
    pub async fn visible(&self, id: Uuid, viewer: Option<Uuid>) -> Result<Moment, AppError> {
        Ok(self.visible_listing(id, viewer).await?.moment)
    }

    async fn visible_listing(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<MomentListing, AppError> {
        self.moment_repo
            .find_listing(id, viewer)
            .await?
            .filter(|l| {
                can_view(
                    l.moment.user_id,
                    l.owner_is_private,
                    l.moment.is_private,
                    viewer,
                )
            })
            .ok_or_else(|| AppError::not_found(format!("Moment {id} not found")))
    }

    async fn owned(&self, ctx: &RequestContext, id: Uuid, action: &str) -> Result<Moment, AppError> {
        let moment = self.visible(id, Some(ctx.user_id)).await?;
        if !ctx.owns(moment.user_id) {
            return Err(AppError::authorization(format!(
                "You do not have permission to {action} this moment"
            )));
        }
        Ok(moment)
    }

    async fn store_tags(&self, tags: &[TagName]) -> Result<Vec<Uuid>, AppError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .tag_repo
            .get_or_create(tags)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect())
    }
}

fn clean_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::field("title", "This field may not be blank"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::field(
            "title",
            format!("Ensure this field has no more than {MAX_TITLE_LENGTH} characters"),
        ));
    }
    Ok(title.to_string())
}

fn clean_description(raw: &str) -> Result<String, AppError> {
    let description = raw.trim();
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(AppError::field(
            "description",
            format!("Ensure this field has no more than {MAX_DESCRIPTION_LENGTH} characters"),
        ));
    }
    Ok(description.to_string())
}

/// Normalize raw tag input. Entries may themselves be comma-separated.
fn parse_tags(raw: &[String]) -> Result<Vec<TagName>, AppError> {
    let tags = TagName::parse_all(raw.iter().flat_map(|entry| entry.split(',')));
    if let Some(bad) = tags.iter().find(|t| !t.is_valid_length()) {
        return Err(AppError::field(
            "tags",
            format!(
                "Tag '{}' is longer than {MAX_TAG_LENGTH} characters",
                bad.name
            ),
        ));
    }
    Ok(tags)
}
