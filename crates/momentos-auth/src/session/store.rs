//! Session persistence keyed by hashed cookie tokens.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use momentos_core::error::AppError;
use momentos_database::repositories::SessionRepository;
use momentos_entity::session::{CreateSession, Session};

use crate::token::{generate_token, hash_token};

/// Issues, resolves, and revokes sessions. Raw tokens never reach the database.
#[derive(Debug, Clone)]
pub struct SessionStore {
    repo: Arc<SessionRepository>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates a store issuing sessions that live for `ttl_hours`.
    pub fn new(repo: Arc<SessionRepository>, ttl_hours: i64) -> Self {
        Self {
            repo,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Open a session for `user_id`, returning the raw cookie token with it.
    pub async fn open(
        &self,
        user_id: Uuid,
        user_agent: Option<String>,
    ) -> Result<(String, Session), AppError> {
        let token = generate_token();
        let session = self
            .repo
            .create(&CreateSession {
                user_id,
                token_hash: hash_token(&token),
                user_agent,
                expires_at: Utc::now() + self.ttl,
            })
            .await?;
        debug!(session_id = %session.id, user_id = %user_id, "Session opened");
        Ok((token, session))
    }

    /// Look up the live session for a raw cookie token.
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>, AppError> {
        if token.is_empty() {
            return Ok(None);
        }
        self.repo.find_active_by_token_hash(&hash_token(token)).await
    }

    /// Record activity on a session.
    pub async fn touch(&self, session_id: Uuid) -> Result<(), AppError> {
        self.repo.touch(session_id).await
    }

    /// Close the session for a raw cookie token. Unknown tokens are ignored.
    pub async fn close(&self, token: &str) -> Result<bool, AppError> {
        self.repo.delete_by_token_hash(&hash_token(token)).await
    }

    /// Close every session of a user.
    pub async fn close_all(&self, user_id: Uuid) -> Result<u64, AppError> {
        self.repo.delete_for_user(user_id).await
    }

    /// Drop expired sessions.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        self.repo.delete_expired().await
    }
}
