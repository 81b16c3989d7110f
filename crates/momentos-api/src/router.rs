//! Route definitions for the Momentos HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Uploaded
//! media is served as static files under the configured URL prefix.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.media.body_limit_bytes();
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(
        &state.config.server.cors,
        state.csrf.header_name(),
    );

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(moment_routes())
        .merge(comment_routes())
        .merge(notification_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .nest_service(
            &state.config.media.url_prefix,
            ServeDir::new(&state.config.media.root),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Account endpoints: CSRF, registration, sessions, profiles, reset
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/csrf", get(handlers::auth::csrf))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/auth/user",
            get(handlers::auth::current_user).patch(handlers::auth::update_user),
        )
        .route("/auth/profile/{username}", get(handlers::auth::profile))
        .route("/auth/search", get(handlers::auth::search_users))
        .route(
            "/auth/password-reset-code",
            post(handlers::auth::request_reset_code),
        )
        .route(
            "/auth/password-reset-verify",
            post(handlers::auth::verify_reset_code),
        )
        .route("/auth/password-reset", post(handlers::auth::reset_password))
}

/// Moment feed, CRUD, engagement and tags
fn moment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/momentos",
            get(handlers::moment::list_moments).post(handlers::moment::create_moment),
        )
        .route("/momentos/tags", get(handlers::moment::list_tags))
        .route(
            "/momentos/{id}",
            get(handlers::moment::get_moment)
                .patch(handlers::moment::update_moment)
                .delete(handlers::moment::delete_moment),
        )
        .route(
            "/momentos/{id}/suggestions",
            get(handlers::moment::suggestions),
        )
        .route("/momentos/{id}/view", post(handlers::moment::register_view))
        .route(
            "/momentos/{id}/like",
            post(handlers::moment::like_moment).delete(handlers::moment::unlike_moment),
        )
        .route(
            "/momentos/{id}/comentarios",
            get(handlers::comment::list_comments).post(handlers::comment::create_comment),
        )
}

/// Comment edits addressed by comment id
fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comentarios/{id}",
        patch(handlers::comment::update_comment).delete(handlers::comment::delete_comment),
    )
}

/// Notification inbox
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/momentos/notificacoes",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/momentos/notificacoes/marcar-lidas",
            post(handlers::notification::mark_all_read),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
