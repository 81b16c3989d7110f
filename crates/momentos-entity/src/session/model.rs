//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A login session backing the `sessionid` cookie.
///
/// Only the SHA-256 hash of the cookie token is stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hash of the cookie token.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// User-Agent header value at login.
    pub user_agent: Option<String>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// Last activity timestamp.
    pub last_activity: DateTime<Utc>,
}

/// Data required to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hash of the cookie token.
    pub token_hash: String,
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}
