//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use momentos_auth::{CsrfGuard, SessionManager};
use momentos_core::config::AppConfig;
use momentos_service::{
    AccountService, CommentService, EngagementService, MomentService, NotificationService,
    PasswordResetService,
};
use momentos_storage::MediaStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Upload validation and storage
    pub media: Arc<MediaStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Cookie session resolution
    pub session_manager: Arc<SessionManager>,
    /// Double-submit CSRF checks
    pub csrf: Arc<CsrfGuard>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login and profiles
    pub account_service: Arc<AccountService>,
    /// Password-reset codes
    pub password_reset_service: Arc<PasswordResetService>,
    /// Moment CRUD and feeds
    pub moment_service: Arc<MomentService>,
    /// Likes and views
    pub engagement_service: Arc<EngagementService>,
    /// Comments
    pub comment_service: Arc<CommentService>,
    /// Notification inbox
    pub notification_service: Arc<NotificationService>,
}
