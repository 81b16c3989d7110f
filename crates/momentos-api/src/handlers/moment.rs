//! Moment handlers: feed, CRUD, suggestions, views, likes and tags.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use momentos_core::types::pagination::PageResponse;
use momentos_entity::tag::Tag;
use momentos_service::moment::ViewOutcome;

use crate::dto::request::{FeedQuery, moment_changes, new_moment};
use crate::dto::response::{ApiResponse, LikeResponse, MomentDetailResponse, MomentResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, FormData, MaybeAuthUser, parse_uuid};
use crate::state::AppState;

/// GET /api/momentos
pub async fn list_moments(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<ApiResponse<PageResponse<MomentResponse>>>> {
    let page = state
        .moment_service
        .page_request(query.page, query.page_size);
    let feed = state
        .moment_service
        .feed(query.filter(viewer.viewer()), page)
        .await?;
    Ok(Json(ApiResponse::ok(MomentResponse::page(feed, &state.media))))
}

/// POST /api/momentos
pub async fn create_moment(
    State(state): State<AppState>,
    auth: AuthUser,
    form: FormData,
) -> ApiResult<(StatusCode, Json<ApiResponse<MomentDetailResponse>>)> {
    let input = new_moment(form)?;
    let detail = state.moment_service.create(&auth, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(MomentDetailResponse::new(detail, &state.media))),
    ))
}

/// GET /api/momentos/{id}
pub async fn get_moment(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MomentDetailResponse>>> {
    let id = parse_uuid(&id)?;
    let detail = state.moment_service.detail(id, viewer.viewer()).await?;
    Ok(Json(ApiResponse::ok(MomentDetailResponse::new(
        detail,
        &state.media,
    ))))
}

/// PATCH /api/momentos/{id}
pub async fn update_moment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    form: FormData,
) -> ApiResult<Json<ApiResponse<MomentDetailResponse>>> {
    let id = parse_uuid(&id)?;
    let changes = moment_changes(form)?;
    let detail = state.moment_service.update(&auth, id, changes).await?;
    Ok(Json(ApiResponse::ok(MomentDetailResponse::new(
        detail,
        &state.media,
    ))))
}

/// DELETE /api/momentos/{id}
pub async fn delete_moment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_uuid(&id)?;
    state.moment_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/momentos/{id}/suggestions
pub async fn suggestions(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<MomentResponse>>>> {
    let id = parse_uuid(&id)?;
    let cards = state.moment_service.suggestions(id, viewer.viewer()).await?;
    let items = cards
        .into_iter()
        .map(|card| MomentResponse::new(card, &state.media))
        .collect();
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/momentos/{id}/view
pub async fn register_view(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ViewOutcome>>> {
    let id = parse_uuid(&id)?;
    let outcome = state.engagement_service.view(id, viewer.viewer()).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/momentos/{id}/like
pub async fn like_moment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<ApiResponse<LikeResponse>>)> {
    let id = parse_uuid(&id)?;
    let total_likes = state.engagement_service.like(&auth, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(LikeResponse {
            message: "Moment liked".to_string(),
            total_likes,
        })),
    ))
}

/// DELETE /api/momentos/{id}/like
pub async fn unlike_moment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<LikeResponse>>> {
    let id = parse_uuid(&id)?;
    let total_likes = state.engagement_service.unlike(&auth, id).await?;
    Ok(Json(ApiResponse::ok(LikeResponse {
        message: "Like removed".to_string(),
        total_likes,
    })))
}

/// GET /api/momentos/tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<Tag>>>> {
    let tags = state.moment_service.tags().await?;
    Ok(Json(ApiResponse::ok(tags)))
}
