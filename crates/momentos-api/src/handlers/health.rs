//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use momentos_database::connection::ping;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// 200 when both the database and media storage answer, 503 otherwise.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let database_ok = match ping(&state.db_pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };
    let storage_ok = match state.media.provider().health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach media storage");
            false
        }
    };

    let healthy = database_ok && storage_ok;
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(ApiResponse::ok(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: if database_ok { "connected" } else { "unreachable" }.to_string(),
            storage: if storage_ok { "available" } else { "unavailable" }.to_string(),
        })),
    )
}
