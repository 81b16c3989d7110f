//! Application builder: wires repositories, auth, services and the router.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use momentos_auth::{CsrfGuard, PasswordHasher, PasswordPolicy, SessionManager, SessionStore};
use momentos_core::config::AppConfig;
use momentos_core::error::AppError;
use momentos_core::traits::{Mailer, StorageProvider};
use momentos_database::repositories::{
    CommentRepository, LikeRepository, MomentRepository, NotificationRepository,
    SessionRepository, TagRepository, UserRepository,
};
use momentos_service::{
    AccountService, CommentService, EngagementService, MomentService, NotificationService,
    Notifier, PasswordResetService, SmtpMailer,
};
use momentos_storage::{LocalStorageProvider, MediaStore};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Constructs every shared dependency behind [`AppState`].
///
/// The mailer is injected so tests can capture outgoing mail.
pub async fn build_state(
    config: AppConfig,
    db_pool: PgPool,
    mailer: Arc<dyn Mailer>,
) -> Result<AppState, AppError> {
    // ── Step 1: Media storage ────────────────────────────────────
    let provider = LocalStorageProvider::new(&config.media.root).await?;
    tracing::info!(
        provider = provider.provider_type(),
        root = %provider.root().display(),
        "Media storage ready"
    );
    let provider: Arc<dyn StorageProvider> = Arc::new(provider);
    let media = Arc::new(MediaStore::new(provider, config.media.clone()));

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
    let moment_repo = Arc::new(MomentRepository::new(db_pool.clone()));
    let tag_repo = Arc::new(TagRepository::new(db_pool.clone()));
    let like_repo = Arc::new(LikeRepository::new(db_pool.clone()));
    let comment_repo = Arc::new(CommentRepository::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(db_pool.clone()));

    // ── Step 3: Auth ─────────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_policy = Arc::new(PasswordPolicy::new(&config.auth));
    let session_store = Arc::new(SessionStore::new(
        Arc::clone(&session_repo),
        config.auth.session_ttl_hours,
    ));
    let session_manager = Arc::new(SessionManager::new(
        session_store,
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
    ));
    let csrf = Arc::new(CsrfGuard::new(&config.auth));

    // ── Step 4: Services ─────────────────────────────────────────
    let notifier = Arc::new(Notifier::new(Arc::clone(&notification_repo)));

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&session_manager),
        Arc::clone(&password_hasher),
        Arc::clone(&password_policy),
        Arc::clone(&media),
    ));
    let password_reset_service = Arc::new(PasswordResetService::new(
        Arc::clone(&user_repo),
        Arc::clone(&session_manager),
        Arc::clone(&password_hasher),
        Arc::clone(&password_policy),
        mailer,
        &config.password_reset,
    ));
    let moment_service = Arc::new(MomentService::new(
        Arc::clone(&moment_repo),
        Arc::clone(&tag_repo),
        Arc::clone(&comment_repo),
        Arc::clone(&media),
        config.feed.clone(),
    ));
    let engagement_service = Arc::new(EngagementService::new(
        Arc::clone(&moment_service),
        Arc::clone(&moment_repo),
        Arc::clone(&like_repo),
        Arc::clone(&notifier),
        config.feed.view_milestone,
    ));
    let comment_service = Arc::new(CommentService::new(
        Arc::clone(&comment_repo),
        Arc::clone(&moment_service),
        Arc::clone(&notifier),
    ));
    let notification_service = Arc::new(NotificationService::new(notification_repo));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        media,
        session_manager,
        csrf,
        account_service,
        password_reset_service,
        moment_service,
        engagement_service,
        comment_service,
        notification_service,
    })
}

/// Runs the Momentos server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let mailer = SmtpMailer::new(&config.email)?;
    if !mailer.is_enabled() {
        tracing::warn!("SMTP host not configured; outgoing mail will only be logged");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db_pool, Arc::new(mailer)).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(addr = %addr, "Momentos server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, draining connections");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Momentos server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
