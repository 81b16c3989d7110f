//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the API extractors once the session cookie resolves, then passed
/// into service methods so every mutation knows who is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The current session ID.
    pub session_id: Uuid,
    /// The username at the time the request was resolved.
    pub username: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        session_id: Uuid,
        username: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            session_id,
            username,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Whether the acting user is `owner_id`.
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }
}
