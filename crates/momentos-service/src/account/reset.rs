//! Password reset by emailed 6-digit code.
//!
//! 1. `request_code`: issue a code, store it with its send time, email it
//! 2. `verify_code`: check the code without consuming it
//! 3. `reset_password`: check the code again, store the new password
//!
//! Codes expire after the configured window and lock after the configured
//! number of mismatches. A locked code stays locked until a new one is
//! requested.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use momentos_auth::password::{PasswordHasher, PasswordPolicy};
use momentos_auth::session::SessionManager;
use momentos_auth::token::generate_reset_code;
use momentos_core::config::PasswordResetConfig;
use momentos_core::error::AppError;
use momentos_core::traits::mailer::Mailer;
use momentos_database::repositories::UserRepository;
use momentos_entity::user::{ResetOutcome, ResetPolicy, User};

use crate::mail::templates;

/// Drives the password-reset code flow.
#[derive(Clone)]
pub struct PasswordResetService {
    user_repo: Arc<UserRepository>,
    sessions: Arc<SessionManager>,
    hasher: Arc<PasswordHasher>,
    password_policy: Arc<PasswordPolicy>,
    mailer: Arc<dyn Mailer>,
    policy: ResetPolicy,
    ttl_minutes: i64,
}

impl std::fmt::Debug for PasswordResetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordResetService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl PasswordResetService {
    /// Creates a new password-reset service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        sessions: Arc<SessionManager>,
        hasher: Arc<PasswordHasher>,
        password_policy: Arc<PasswordPolicy>,
        mailer: Arc<dyn Mailer>,
        config: &PasswordResetConfig,
    ) -> Self {
        Self {
            user_repo,
            sessions,
            hasher,
            password_policy,
            mailer,
            policy: ResetPolicy::new(config.code_ttl_minutes, config.max_attempts),
            ttl_minutes: config.code_ttl_minutes,
        }
    }

    /// Issue a fresh code to `email`, replacing any outstanding one.
    ///
    /// The email is sent inline; a delivery failure fails the request.
    pub async fn request_code(&self, email: &str) -> Result<(), AppError> {
        let user = self.find_user(email).await?;

        let code = generate_reset_code();
        self.user_repo
            .store_reset_code(user.id, &code, Utc::now())
            .await?;

        let message =
            templates::password_reset_code(&user.email, &user.username, &code, self.ttl_minutes);
        self.mailer.send(message).await?;

        info!(user_id = %user.id, "Password reset code sent");
        Ok(())
    }

    /// Check a code without consuming it. A match resets the attempt counter.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<(), AppError> {
        let user = self.find_user(email).await?;
        self.check_code(&user, code).await
    }

    /// Check the code again and replace the password. All sessions of the
    /// user are closed afterwards.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.find_user(email).await?;
        self.check_code(&user, code).await?;

        self.password_policy
            .validate("new_password", new_password, &user.username, &user.email)?;
        let hash = self.hasher.hash_password(new_password)?;
        self.user_repo.complete_password_reset(user.id, &hash).await?;

        if let Err(e) = self.sessions.revoke_all(user.id).await {
            warn!(user_id = %user.id, error = %e, "Failed to revoke sessions after reset");
        }

        info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }

    async fn find_user(&self, email: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("No user registered with this email"))
    }

    async fn check_code(&self, user: &User, code: &str) -> Result<(), AppError> {
        match user.reset_state().check(code, Utc::now(), &self.policy) {
            ResetOutcome::Valid => {
                self.user_repo.reset_reset_attempts(user.id).await?;
                Ok(())
            }
            ResetOutcome::NoCode => Err(AppError::field(
                "code",
                "No reset code was requested for this email",
            )),
            ResetOutcome::Expired => {
                self.user_repo.clear_reset_code(user.id).await?;
                Err(AppError::field(
                    "code",
                    "The reset code has expired; request a new one",
                ))
            }
            ResetOutcome::Locked => Err(AppError::field(
                "code",
                "Too many incorrect attempts; request a new code",
            )),
            ResetOutcome::Mismatch { .. } => {
                let attempts = self.user_repo.increment_reset_attempts(user.id).await?;
                let remaining = (self.policy.max_attempts - attempts).max(0);
                warn!(user_id = %user.id, attempts, "Incorrect reset code");
                Err(AppError::field(
                    "code",
                    format!("Invalid code; {remaining} attempt(s) remaining"),
                ))
            }
        }
    }
}
