//! Response DTOs.
//!
//! Stored media paths are turned into URLs here, so every constructor that
//! touches an avatar, thumbnail or video takes the [`MediaStore`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use momentos_core::types::pagination::PageResponse;
use momentos_entity::comment::CommentWithAuthor;
use momentos_entity::tag::Tag;
use momentos_entity::user::{UserSummary, UserWithStats};
use momentos_service::moment::{MomentCard, MomentDetail};
use momentos_storage::MediaStore;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Freshly issued CSRF token, also set as a cookie.
#[derive(Debug, Clone, Serialize)]
pub struct CsrfResponse {
    /// Value to echo in the CSRF header.
    pub csrf_token: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `connected` or `unreachable`.
    pub database: String,
    /// `available` or `unavailable`.
    pub storage: String,
}

/// Compact user reference.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
}

impl UserSummaryResponse {
    pub fn new(user: UserSummary, media: &MediaStore) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar.as_deref().map(|p| media.url_for(p)),
        }
    }
}

/// The signed-in user's own profile.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub bio: String,
    pub birth_date: Option<NaiveDate>,
    pub is_private: bool,
    pub total_moments: i64,
    pub total_likes_received: i64,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn new(stats: UserWithStats, media: &MediaStore) -> Self {
        let user = stats.user;
        Self {
            id: user.id,
            avatar: user.avatar.as_deref().map(|p| media.url_for(p)),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            birth_date: user.birth_date,
            is_private: user.is_private,
            total_moments: stats.total_moments,
            total_likes_received: stats.total_likes_received,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// Another user's profile as anyone may see it. Email and birth date stay private.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub bio: String,
    pub is_private: bool,
    pub total_moments: i64,
    pub total_likes_received: i64,
    pub created_at: DateTime<Utc>,
}

impl PublicUserResponse {
    pub fn new(stats: UserWithStats, media: &MediaStore) -> Self {
        let user = stats.user;
        Self {
            id: user.id,
            avatar: user.avatar.as_deref().map(|p| media.url_for(p)),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            is_private: user.is_private,
            total_moments: stats.total_moments,
            total_likes_received: stats.total_likes_received,
            created_at: user.created_at,
        }
    }
}

/// Public profile with the moments the viewer may see.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUserResponse,
    pub moments: PageResponse<MomentResponse>,
}

/// Login response. The session itself travels in a cookie.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// Rotated CSRF token, also set as a cookie.
    pub csrf_token: String,
}

/// A moment as listed in feeds.
#[derive(Debug, Clone, Serialize)]
pub struct MomentResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub duration_seconds: i32,
    pub views: i64,
    pub total_likes: i64,
    pub is_liked: bool,
    pub is_private: bool,
    pub tags: Vec<Tag>,
    pub owner: UserSummaryResponse,
    pub created_at: DateTime<Utc>,
}

impl MomentResponse {
    pub fn new(card: MomentCard, media: &MediaStore) -> Self {
        let owner = UserSummaryResponse::new(card.listing.owner(), media);
        let listing = card.listing;
        let moment = listing.moment;
        Self {
            id: moment.id,
            thumbnail: moment.thumbnail.as_deref().map(|p| media.url_for(p)),
            title: moment.title,
            description: moment.description,
            duration_seconds: moment.duration_seconds,
            views: moment.views,
            total_likes: listing.total_likes,
            is_liked: listing.is_liked,
            is_private: moment.is_private,
            tags: card.tags,
            owner,
            created_at: moment.created_at,
        }
    }

    /// Convert a whole feed page.
    pub fn page(page: PageResponse<MomentCard>, media: &MediaStore) -> PageResponse<Self> {
        page.map(|card| Self::new(card, media))
    }
}

/// A single moment with its video and comments.
#[derive(Debug, Clone, Serialize)]
pub struct MomentDetailResponse {
    #[serde(flatten)]
    pub moment: MomentResponse,
    pub video: String,
    pub updated_at: DateTime<Utc>,
    pub comments: Vec<CommentResponse>,
}

impl MomentDetailResponse {
    pub fn new(detail: MomentDetail, media: &MediaStore) -> Self {
        let video = media.url_for(&detail.card.listing.moment.video);
        let updated_at = detail.card.listing.moment.updated_at;
        Self {
            moment: MomentResponse::new(detail.card, media),
            video,
            updated_at,
            comments: detail
                .comments
                .into_iter()
                .map(|c| CommentResponse::new(c, media))
                .collect(),
        }
    }
}

/// A comment with its author.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub moment_id: Uuid,
    pub text: String,
    pub author: UserSummaryResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn new(comment: CommentWithAuthor, media: &MediaStore) -> Self {
        let author = UserSummaryResponse::new(comment.author(), media);
        let comment = comment.comment;
        Self {
            id: comment.id,
            moment_id: comment.moment_id,
            text: comment.text,
            author,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Result of a like or unlike.
#[derive(Debug, Clone, Serialize)]
pub struct LikeResponse {
    pub message: String,
    pub total_likes: i64,
}

/// Result of mark-all-read.
#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    /// Notifications flipped from unread to read.
    pub updated: u64,
}
