//! Notification handlers.

use axum::Json;
use axum::extract::{Query, State};

use momentos_service::NotificationFeed;

use crate::dto::response::{ApiResponse, MarkReadResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// GET /api/momentos/notificacoes
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<NotificationFeed>>> {
    let page = params.into_page_request(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let feed = state.notification_service.list(&auth, page).await?;
    Ok(Json(ApiResponse::ok(feed)))
}

/// POST /api/momentos/notificacoes/marcar-lidas
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<MarkReadResponse>>> {
    let updated = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(MarkReadResponse { updated })))
}
