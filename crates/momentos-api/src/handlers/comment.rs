//! Comment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use crate::dto::request::CommentRequest;
use crate::dto::response::{ApiResponse, CommentResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, MaybeAuthUser, parse_uuid};
use crate::state::AppState;

/// GET /api/momentos/{id}/comentarios
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(moment_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<CommentResponse>>>> {
    let moment_id = parse_uuid(&moment_id)?;
    let comments = state
        .comment_service
        .list(moment_id, viewer.viewer())
        .await?;
    let items = comments
        .into_iter()
        .map(|c| CommentResponse::new(c, &state.media))
        .collect();
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/momentos/{id}/comentarios
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(moment_id): Path<String>,
    JsonBody(req): JsonBody<CommentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CommentResponse>>)> {
    req.validate()?;
    let moment_id = parse_uuid(&moment_id)?;
    let comment = state
        .comment_service
        .create(&auth, moment_id, &req.text)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CommentResponse::new(comment, &state.media))),
    ))
}

/// PATCH /api/comentarios/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<CommentRequest>,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    req.validate()?;
    let id = parse_uuid(&id)?;
    let comment = state.comment_service.update(&auth, id, &req.text).await?;
    Ok(Json(ApiResponse::ok(CommentResponse::new(
        comment,
        &state.media,
    ))))
}

/// DELETE /api/comentarios/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_uuid(&id)?;
    state.comment_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
