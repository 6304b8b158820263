//! Handlers for the `/auth` resource (signup, login, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use moviemaze_core::error::CoreError;
use moviemaze_core::roles::ROLE_USER;
use moviemaze_core::validation::{normalize_email, require_non_empty, validate_password};
use moviemaze_db::models::user::{CreateUser, User, UserResponse};
use moviemaze_db::repositories::UserRepo;
use moviemaze_db::{is_unique_violation, UQ_USERS_EMAIL};

use crate::auth::cookie::{cleared_session_cookie, session_cookie};
use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Login failures never reveal whether the email exists.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Register a new account with the `user` role. The token is returned in the
/// body and also set as the session cookie.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<SignupRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<DataResponse<AuthResponse>>)> {
    let name = require_non_empty("Name", &input.name)?;
    let email = normalize_email(&input.email)?;
    validate_password(&input.password)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::DuplicateEmail(email)));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        name,
        email,
        password_hash,
        role: ROLE_USER.to_string(),
    };

    // A concurrent signup can still win the race past the pre-check.
    let user = UserRepo::create(&state.pool, &create)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, UQ_USERS_EMAIL) {
                AppError::Core(CoreError::DuplicateEmail(create.email.clone()))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(user_id = user.id, "User signed up");

    let response = auth_response(&state, user)?;
    let jar = jar.add(session_cookie(response.token.clone(), &state.config));
    Ok((StatusCode::CREATED, jar, Json(DataResponse { data: response })))
}

/// POST /api/auth/login
///
/// Authenticate with email + password; sets the session cookie like signup.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<LoginRequest>,
) -> AppResult<(CookieJar, Json<DataResponse<AuthResponse>>)> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");

    let response = auth_response(&state, user)?;
    let jar = jar.add(session_cookie(response.token.clone(), &state.config));
    Ok((jar, Json(DataResponse { data: response })))
}

/// POST /api/auth/logout
///
/// Clears the session cookie. Bearer tokens are stateless and are simply
/// discarded by the client, so no token is required here.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (StatusCode, CookieJar) {
    tracing::info!("Session cookie cleared");
    (
        StatusCode::NO_CONTENT,
        jar.add(cleared_session_cookie(&state.config)),
    )
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}
