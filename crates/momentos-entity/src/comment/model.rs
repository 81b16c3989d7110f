//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserSummary;

/// Longest accepted comment, in characters.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// A comment on a moment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// Author.
    pub user_id: Uuid,
    /// Moment commented on.
    pub moment_id: Uuid,
    /// Comment text.
    pub text: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
    /// When the comment was last edited.
    pub updated_at: DateTime<Utc>,
}

/// A comment joined with its author.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentWithAuthor {
    /// The comment row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub comment: Comment,
    /// Author's login name.
    pub author_username: String,
    /// Author's given name.
    pub author_first_name: String,
    /// Author's family name.
    pub author_last_name: String,
    /// Author's avatar path.
    pub author_avatar: Option<String>,
}

impl CommentWithAuthor {
    /// Author info in the shape embedded in responses.
    pub fn author(&self) -> UserSummary {
        UserSummary {
            id: self.comment.user_id,
            username: self.author_username.clone(),
            first_name: self.author_first_name.clone(),
            last_name: self.author_last_name.clone(),
            avatar: self.author_avatar.clone(),
        }
    }
}
