//! Who is calling: the `AuthUser` extractor.
//!
//! API clients send `Authorization: Bearer <jwt>`; browsers rely on the
//! httpOnly `token` cookie set at login. The header wins when both are sent.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use moviemaze_core::error::CoreError;
use moviemaze_core::roles::ROLE_ADMIN;
use moviemaze_core::types::DbId;

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity taken from a valid access token.
///
/// Handlers that accept it are closed to anonymous callers:
///
/// ```ignore
/// async fn cast_vote(user: AuthUser, ...) -> AppResult<...> {
///     VoteRepo::cast(&state.pool, user.user_id, movie_id, direction).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `users.id` of the caller (`claims.sub`).
    pub user_id: DbId,
    /// `"admin"` or `"user"`.
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing bearer token or session cookie".into(),
                ))
            })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}

fn cookie_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}
