//! Request DTOs with validation.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use momentos_core::error::AppError;
use momentos_entity::moment::{FeedFilter, FeedSort};
use momentos_service::account::{ProfileChanges, Registration};
use momentos_service::moment::{MomentChanges, NewMoment};

use crate::extractors::FormData;

const REQUIRED: &str = "This field is required";

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1 to 150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,
    /// Email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Password confirmation.
    #[validate(length(min = 1, message = "Password confirmation is required"))]
    pub password2: String,
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            username: req.username,
            email: req.email,
            password: req.password,
            password2: req.password2,
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
        }
    }
}

/// Usernames may contain letters, digits and `@ . + - _`.
fn validate_username(username: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if username.chars().all(allowed) {
        Ok(())
    } else {
        Err(ValidationError::new("username").with_message(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters"
                .into(),
        ))
    }
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request a password-reset code.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetCodeRequest {
    /// Account email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
}

/// Check a password-reset code.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetVerifyRequest {
    /// Account email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// The emailed code.
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

/// Set a new password with a reset code.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Account email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// The emailed code.
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
    /// New password.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Comment body for create and edit.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentRequest {
    /// Comment text.
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,
}

/// Feed query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    /// Tag slug.
    pub tag: Option<String>,
    /// Owner username.
    #[serde(alias = "user")]
    pub usuario: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// `recent`, `popular` or `trending`.
    pub sort: Option<String>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl FeedQuery {
    /// The filter this query describes, as seen by `viewer`.
    pub fn filter(&self, viewer: Option<uuid::Uuid>) -> FeedFilter {
        FeedFilter {
            tag_slug: self.tag.clone(),
            owner_username: self.usuario.clone(),
            search: self.search.clone(),
            viewer,
            sort: FeedSort::from_query(self.sort.as_deref()),
        }
    }
}

/// Username search query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSearchQuery {
    /// Substring to look for.
    #[serde(default)]
    pub search: String,
    /// Page number (1-based).
    pub page: Option<u64>,
}

/// Profile edit from a JSON or multipart body.
pub fn profile_changes(mut form: FormData) -> Result<ProfileChanges, AppError> {
    Ok(ProfileChanges {
        first_name: form.text("first_name"),
        last_name: form.text("last_name"),
        bio: form.text("bio"),
        birth_date: form.date("birth_date")?,
        is_private: form.flag("is_private")?,
        avatar: form.take_file("avatar"),
    })
}

/// A new moment from a multipart body.
pub fn new_moment(mut form: FormData) -> Result<NewMoment, AppError> {
    let title = form
        .text("title")
        .ok_or_else(|| AppError::field("title", REQUIRED))?;
    let video = form
        .take_file("video")
        .ok_or_else(|| AppError::field("video", "No video file was submitted"))?;

    Ok(NewMoment {
        title,
        description: form.text("description").unwrap_or_default(),
        tags: form.list("tags").unwrap_or_default(),
        duration_seconds: form.integer("duration")?.unwrap_or(0),
        is_private: form.flag("is_private")?.unwrap_or(false),
        thumbnail: form.take_file("thumbnail"),
        video,
    })
}

/// Moment edit from a JSON or multipart body.
pub fn moment_changes(mut form: FormData) -> Result<MomentChanges, AppError> {
    Ok(MomentChanges {
        title: form.text("title"),
        description: form.text("description"),
        is_private: form.flag("is_private")?,
        tags: form.list("tags"),
        thumbnail: form.take_file("thumbnail"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: "praia7".into(),
            password2: "praia7".into(),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(register("ana.souza", "ana@example.com").validate().is_ok());
    }

    #[test]
    fn username_characters_are_restricted() {
        let errors = register("ana souza!", "ana@example.com").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn email_must_be_an_address() {
        let errors = register("ana", "not-an-email").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn user_is_an_alias_for_usuario() {
        let query: FeedQuery = serde_json::from_value(serde_json::json!({
            "user": "ana",
            "sort": "trending"
        }))
        .unwrap();
        let filter = query.filter(None);
        assert_eq!(filter.owner_username.as_deref(), Some("ana"));
        assert_eq!(filter.sort, FeedSort::Trending);
    }
}
