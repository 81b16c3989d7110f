//! Registration, login, and profile operations.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use momentos_auth::password::{PasswordHasher, PasswordPolicy};
use momentos_auth::session::{LoginResult, SessionManager};
use momentos_core::error::AppError;
use momentos_core::types::pagination::{PageRequest, PageResponse};
use momentos_database::repositories::UserRepository;
use momentos_entity::user::{CreateUser, UpdateProfile, User, UserSummary, UserWithStats};
use momentos_storage::{MediaKind, MediaStore};

use crate::context::RequestContext;
use crate::upload::FileUpload;

/// Longest accepted bio.
pub const MAX_BIO_LENGTH: usize = 500;
/// Longest accepted first or last name.
pub const MAX_NAME_LENGTH: usize = 150;

/// Data for creating an account.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password confirmation.
    pub password2: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Partial update of the caller's own profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New bio.
    pub bio: Option<String>,
    /// New birth date; `Some(None)` clears it.
    pub birth_date: Option<Option<NaiveDate>>,
    /// New privacy flag.
    pub is_private: Option<bool>,
    /// New avatar image.
    pub avatar: Option<FileUpload>,
}

/// Handles account lifecycle and profile operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Session manager for login/logout.
    sessions: Arc<SessionManager>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    policy: Arc<PasswordPolicy>,
    /// Avatar storage.
    media: Arc<MediaStore>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        sessions: Arc<SessionManager>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
        media: Arc<MediaStore>,
    ) -> Self {
        Self {
            user_repo,
            sessions,
            hasher,
            policy,
            media,
        }
    }

    /// Create an account. Does not log the user in.
    pub async fn register(&self, input: Registration) -> Result<User, AppError> {
        let username = input.username.trim().to_string();
        let email = input.email.trim().to_lowercase();

        if input.password != input.password2 {
            return Err(AppError::field("password", "Passwords do not match"));
        }
        self.policy
            .validate("password", &input.password, &username, &email)?;

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                email,
                password_hash,
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and open a session.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        user_agent: Option<String>,
    ) -> Result<LoginResult, AppError> {
        self.sessions.login(username, password, user_agent).await
    }

    /// End the session behind `token`.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessions.logout(token).await
    }

    /// The caller's profile with counters.
    pub async fn current(&self, ctx: &RequestContext) -> Result<UserWithStats, AppError> {
        self.user_repo
            .find_with_stats(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Apply a partial update to the caller's profile.
    ///
    /// A new avatar is stored before the row is updated; the previous file
    /// is removed only once the update succeeded.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        changes: ProfileChanges,
    ) -> Result<UserWithStats, AppError> {
        let mut update = UpdateProfile {
            first_name: clean_name("first_name", changes.first_name)?,
            last_name: clean_name("last_name", changes.last_name)?,
            bio: changes.bio.map(|b| b.trim().to_string()),
            birth_date: changes.birth_date,
            is_private: changes.is_private,
            avatar: None,
        };
        if let Some(bio) = &update.bio {
            if bio.chars().count() > MAX_BIO_LENGTH {
                return Err(AppError::field(
                    "bio",
                    format!("Ensure this field has no more than {MAX_BIO_LENGTH} characters"),
                ));
            }
        }

        let previous_avatar = match &changes.avatar {
            Some(_) => self.current(ctx).await?.user.avatar,
            None => None,
        };
        if let Some(avatar) = changes.avatar {
            update.avatar = Some(
                self.media
                    .save(MediaKind::Avatar, &avatar.filename, avatar.data)
                    .await?,
            );
        }

        if !update.is_empty() {
            if let Err(e) = self.user_repo.update_profile(ctx.user_id, &update).await {
                if let Some(path) = &update.avatar {
                    self.media.remove(path).await;
                }
                return Err(e);
            }
            info!(user_id = %ctx.user_id, "Profile updated");
        }

        if let (Some(old), Some(_)) = (previous_avatar, &update.avatar) {
            self.media.remove(&old).await;
        }

        self.current(ctx).await
    }

    /// Profile of `username` with counters. Moments are listed separately
    /// through the feed, which applies visibility rules.
    pub async fn public_profile(&self, username: &str) -> Result<UserWithStats, AppError> {
        self.user_repo
            .find_with_stats_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    /// Users whose username contains `query`. A blank query matches nobody.
    pub async fn search(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<PageResponse<UserSummary>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(PageResponse::empty(&page));
        }
        self.user_repo.search_by_username(query, &page).await
    }
}

fn clean_name(field: &str, value: Option<String>) -> Result<Option<String>, AppError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let value = value.trim().to_string();
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::field(
            field,
            format!("Ensure this field has no more than {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_bounded() {
        assert_eq!(
            clean_name("first_name", Some("  Ana ".into())).unwrap(),
            Some("Ana".to_string())
        );
        assert_eq!(clean_name("first_name", None).unwrap(), None);
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = clean_name("last_name", Some(long)).unwrap_err();
        assert!(err.details.unwrap().contains_key("last_name"));
    }
}
