//! Account handlers: CSRF, registration, login/logout, profiles, search and
//! password reset.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use momentos_core::config::AuthConfig;
use momentos_core::types::pagination::{PageRequest, PageResponse};
use momentos_entity::moment::{FeedFilter, FeedSort};
use momentos_entity::user::UserWithStats;

use crate::dto::request::{
    LoginRequest, RegisterRequest, ResetCodeRequest, ResetPasswordRequest, ResetVerifyRequest,
    UserSearchQuery, profile_changes,
};
use crate::dto::response::{
    ApiResponse, CsrfResponse, LoginResponse, MessageResponse, MomentResponse, ProfileResponse,
    PublicUserResponse, UserResponse, UserSummaryResponse,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, FormData, JsonBody, MaybeAuthUser, PaginationParams};
use crate::state::AppState;

/// CSRF cookies outlive sessions; a year matches common framework defaults.
const CSRF_COOKIE_DAYS: i64 = 365;

fn session_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.session_cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(time::Duration::hours(config.session_ttl_hours))
        .build()
}

/// Readable by scripts so the client can echo it in the CSRF header.
fn csrf_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.csrf_cookie_name.clone(), token))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(time::Duration::days(CSRF_COOKIE_DAYS))
        .build()
}

/// GET /api/auth/csrf
pub async fn csrf(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<CsrfResponse>>) {
    let token = state.csrf.issue();
    let jar = jar.add(csrf_cookie(&state.config.auth, token.clone()));
    (jar, Json(ApiResponse::ok(CsrfResponse { csrf_token: token })))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    req.validate()?;
    let user = state.account_service.register(req.into()).await?;

    let stats = UserWithStats {
        user,
        total_moments: 0,
        total_likes_received: 0,
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::new(stats, &state.media))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    req.validate()?;
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let result = state
        .account_service
        .login(&req.username, &req.password, user_agent)
        .await?;
    let stats = state
        .account_service
        .public_profile(&result.user.username)
        .await?;

    let csrf_token = state.csrf.issue();
    let jar = jar
        .add(session_cookie(&state.config.auth, result.token))
        .add(csrf_cookie(&state.config.auth, csrf_token.clone()));

    Ok((
        jar,
        Json(ApiResponse::ok(LoginResponse {
            user: UserResponse::new(stats, &state.media),
            csrf_token,
        })),
    ))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<MessageResponse>>)> {
    let cookie_name = state.config.auth.session_cookie_name.clone();
    if let Some(token) = jar.get(&cookie_name).map(|c| c.value().to_string()) {
        state.account_service.logout(&token).await?;
    }
    tracing::info!(user_id = %auth.user_id, session_id = %auth.session_id, "User logged out");

    let jar = jar.remove(Cookie::build(cookie_name).path("/"));
    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse::new("Logged out successfully"))),
    ))
}

/// GET /api/auth/user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let stats = state.account_service.current(&auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::new(stats, &state.media))))
}

/// PATCH /api/auth/user
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    form: FormData,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let changes = profile_changes(form)?;
    let stats = state.account_service.update_profile(&auth, changes).await?;
    Ok(Json(ApiResponse::ok(UserResponse::new(stats, &state.media))))
}

/// GET /api/auth/profile/{username}
///
/// The profile itself is always shown; its moments go through the feed's
/// visibility filter, so a private profile lists nothing to strangers.
pub async fn profile(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(username): Path<String>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<ProfileResponse>>> {
    let stats = state.account_service.public_profile(&username).await?;

    let filter = FeedFilter {
        owner_username: Some(stats.user.username.clone()),
        viewer: viewer.viewer(),
        sort: FeedSort::Recent,
        ..Default::default()
    };
    let page = state
        .moment_service
        .page_request(params.page, params.page_size);
    let moments = state.moment_service.feed(filter, page).await?;

    Ok(Json(ApiResponse::ok(ProfileResponse {
        user: PublicUserResponse::new(stats, &state.media),
        moments: MomentResponse::page(moments, &state.media),
    })))
}

/// GET /api/auth/search?search=
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<UserSearchQuery>,
) -> ApiResult<Json<ApiResponse<PageResponse<UserSummaryResponse>>>> {
    let page = PageRequest::new(
        query.page.unwrap_or(1),
        state.config.feed.user_search_page_size,
    );
    let users = state.account_service.search(&query.search, page).await?;
    Ok(Json(ApiResponse::ok(
        users.map(|u| UserSummaryResponse::new(u, &state.media)),
    )))
}

/// POST /api/auth/password-reset-code
pub async fn request_reset_code(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ResetCodeRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    req.validate()?;
    state.password_reset_service.request_code(&req.email).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "A reset code was sent to your email",
    ))))
}

/// POST /api/auth/password-reset-verify
pub async fn verify_reset_code(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ResetVerifyRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    req.validate()?;
    state
        .password_reset_service
        .verify_code(&req.email, &req.code)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Code is valid"))))
}

/// POST /api/auth/password-reset
pub async fn reset_password(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ResetPasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    req.validate()?;
    state
        .password_reset_service
        .reset_password(&req.email, &req.code, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password has been reset",
    ))))
}
