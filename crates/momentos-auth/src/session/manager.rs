//! Session lifecycle manager: login, logout, and request authentication.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use momentos_core::error::AppError;
use momentos_database::repositories::UserRepository;
use momentos_entity::session::Session;
use momentos_entity::user::User;

use crate::password::PasswordHasher;

use super::store::SessionStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Raw token to place in the session cookie.
    pub token: String,
    /// Created session.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// Session persistence.
    store: Arc<SessionStore>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        store: Arc<SessionStore>,
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            store,
            user_repo,
            hasher,
        }
    }

    /// Authenticate credentials and open a session.
    ///
    /// 1. Find user by username (case-insensitive)
    /// 2. Verify password
    /// 3. Open session and stamp last login
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        user_agent: Option<String>,
    ) -> Result<LoginResult, AppError> {
        let invalid = || AppError::authentication("Invalid credentials");

        let Some(user) = self.user_repo.find_by_username(username.trim()).await? else {
            self.hasher.verify_dummy(password);
            warn!(username = %username, "Login failed: unknown user");
            return Err(invalid());
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid());
        }

        let (token, session) = self.store.open(user.id, user_agent).await?;
        self.user_repo.update_last_login(user.id).await?;

        if let Err(e) = self.store.purge_expired().await {
            warn!(error = %e, "Failed to purge expired sessions");
        }

        info!(user_id = %user.id, session_id = %session.id, "User logged in");
        Ok(LoginResult {
            token,
            session,
            user,
        })
    }

    /// Resolve a cookie token into its session and user.
    pub async fn authenticate(&self, token: &str) -> Result<Option<(Session, User)>, AppError> {
        let Some(session) = self.store.resolve(token).await? else {
            return Ok(None);
        };
        let Some(user) = self.user_repo.find_by_id(session.user_id).await? else {
            return Ok(None);
        };
        self.store.touch(session.id).await?;
        Ok(Some((session, user)))
    }

    /// End the session behind a cookie token.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        if self.store.close(token).await? {
            info!("User logged out");
        }
        Ok(())
    }

    /// End every session of a user, e.g. after a password reset.
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<u64, AppError> {
        let closed = self.store.close_all(user_id).await?;
        info!(user_id = %user_id, closed, "Revoked user sessions");
        Ok(closed)
    }
}
