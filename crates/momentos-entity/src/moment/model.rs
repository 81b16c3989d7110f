//! Moment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserSummary;

/// A short video posted by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Moment {
    /// Unique moment identifier.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Video path relative to the media root.
    pub video: String,
    /// Thumbnail path relative to the media root.
    pub thumbnail: Option<String>,
    /// Length in seconds.
    pub duration_seconds: i32,
    /// View counter. Only ever incremented.
    pub views: i64,
    /// Hide this moment from everyone but the owner.
    pub is_private: bool,
    /// When the moment was created.
    pub created_at: DateTime<Utc>,
    /// When the moment was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A moment joined with its owner and like counters, as listed in feeds.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MomentListing {
    /// The moment row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub moment: Moment,
    /// Owner's login name.
    pub owner_username: String,
    /// Owner's given name.
    pub owner_first_name: String,
    /// Owner's family name.
    pub owner_last_name: String,
    /// Owner's avatar path.
    pub owner_avatar: Option<String>,
    /// Whether the owner's profile is private.
    pub owner_is_private: bool,
    /// Distinct likes on the moment.
    pub total_likes: i64,
    /// Whether the requesting user liked it.
    pub is_liked: bool,
}

impl MomentListing {
    /// Owner info in the shape embedded in responses.
    pub fn owner(&self) -> UserSummary {
        UserSummary {
            id: self.moment.user_id,
            username: self.owner_username.clone(),
            first_name: self.owner_first_name.clone(),
            last_name: self.owner_last_name.clone(),
            avatar: self.owner_avatar.clone(),
        }
    }
}

/// A tag row paired with the moment it is attached to.
#[derive(Debug, Clone, FromRow)]
pub struct MomentTag {
    /// Moment the tag belongs to.
    pub moment_id: Uuid,
    /// Tag identifier.
    pub id: Uuid,
    /// Tag name.
    pub name: String,
    /// Tag slug.
    pub slug: String,
}

/// Data required to create a moment.
#[derive(Debug, Clone)]
pub struct CreateMoment {
    /// Owner.
    pub user_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Stored video path.
    pub video: String,
    /// Stored thumbnail path.
    pub thumbnail: Option<String>,
    /// Length in seconds.
    pub duration_seconds: i32,
    /// Privacy flag.
    pub is_private: bool,
}

/// Partial moment update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateMoment {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New thumbnail path.
    pub thumbnail: Option<String>,
    /// New privacy flag.
    pub is_private: Option<bool>,
}

/// Whether an increment that produced `views_after` is the one that
/// reached the milestone.
///
/// Increments are atomic and each returns its own post-value, so exactly
/// one request ever observes `views_after == milestone`.
pub fn reached_view_milestone(views_after: i64, milestone: i64) -> bool {
    milestone > 0 && views_after == milestone
}
