//! User entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::reset::ResetCodeState;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar path relative to the media root.
    pub avatar: Option<String>,
    /// Short biography.
    pub bio: String,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Hide this user's moments from everyone else.
    pub is_private: bool,
    /// Outstanding password-reset code.
    #[serde(skip_serializing)]
    pub reset_code: Option<String>,
    /// When the reset code was sent.
    #[serde(skip_serializing)]
    pub reset_code_sent_at: Option<DateTime<Utc>>,
    /// Mismatched verifications against the current code.
    #[serde(skip_serializing)]
    pub reset_attempts: i32,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Snapshot of the password-reset fields.
    pub fn reset_state(&self) -> ResetCodeState {
        ResetCodeState {
            code: self.reset_code.clone(),
            sent_at: self.reset_code_sent_at,
            attempts: self.reset_attempts,
        }
    }
}

/// A user row with the engagement counters shown on profiles.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithStats {
    /// The account.
    #[sqlx(flatten)]
    pub user: User,
    /// Number of moments owned.
    pub total_moments: i64,
    /// Likes received across all owned moments.
    pub total_likes_received: i64,
}

/// Compact author info embedded in moments, comments and notifications.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    /// User identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar path relative to the media root.
    pub avatar: Option<String>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New avatar path.
    pub avatar: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New birth date. `Some(None)` clears it.
    pub birth_date: Option<Option<NaiveDate>>,
    /// New privacy flag.
    pub is_private: Option<bool>,
}

impl UpdateProfile {
    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.avatar.is_none()
            && self.bio.is_none()
            && self.birth_date.is_none()
            && self.is_private.is_none()
    }
}
