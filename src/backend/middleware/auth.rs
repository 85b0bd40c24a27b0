/**
 * Authentication Middleware
 *
 * This module protects the API routes. It looks for a session token in the
 * `token` cookie first and then in an `Authorization: Bearer` header,
 * verifies it against the server secret, checks that the user still exists
 * and attaches the user id to the request for handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::backend::auth::sessions::user_id_from_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::users::db::user_exists;

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// Authenticated user data extracted from the session token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Find the session token on a request, cookie first
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Authentication middleware
///
/// Returns 401 when the token is missing, invalid, expired or names a user
/// that no longer exists.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = token_from_headers(request.headers()).ok_or_else(|| {
        tracing::debug!("Request without session token");
        BackendError::unauthorized("User not authenticated")
    })?;

    let user_id = user_id_from_token(&token, &app_state.config.jwt_secret).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        BackendError::unauthorized("Invalid token")
    })?;

    if !user_exists(&app_state.db_pool, user_id).await? {
        tracing::warn!("Token for unknown user {}", user_id);
        return Err(BackendError::unauthorized("User not found"));
    }

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind [`auth_middleware`].
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("User not authenticated")
            })?;

        Ok(AuthUser(user))
    }
}
