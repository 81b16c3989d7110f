//! Session user extractors: resolve the session cookie, enforce CSRF on
//! unsafe methods, and inject the request context.

use axum::extract::FromRequestParts;
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use momentos_core::error::AppError;
use momentos_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state).await?.map(AuthUser).ok_or_else(|| {
            AppError::authentication("Authentication credentials were not provided").into()
        })
    }
}

/// The session user when one is signed in; anonymous requests pass through.
///
/// A present session is held to the same CSRF rule as [`AuthUser`].
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<RequestContext>);

impl MaybeAuthUser {
    /// The signed-in user's id, if any.
    pub fn viewer(&self) -> Option<Uuid> {
        self.0.as_ref().map(|ctx| ctx.user_id)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(resolve(parts, state).await?))
    }
}

/// Look up the session behind the cookie. Unknown or expired tokens count
/// as anonymous.
async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<RequestContext>, ApiError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let Some(token) = jar
        .get(&state.config.auth.session_cookie_name)
        .map(|c| c.value().to_string())
    else {
        return Ok(None);
    };

    let Some((session, user)) = state.session_manager.authenticate(&token).await? else {
        return Ok(None);
    };

    if state.csrf.requires_token(parts.method.as_str()) {
        let cookie = jar.get(state.csrf.cookie_name()).map(|c| c.value());
        let header = parts
            .headers
            .get(state.csrf.header_name())
            .and_then(|v| v.to_str().ok());
        state.csrf.verify(cookie, header)?;
    }

    let user_agent = parts
        .headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    Ok(Some(RequestContext::new(
        user.id,
        session.id,
        user.username,
        user_agent,
    )))
}
