use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use moviemaze_core::error::CoreError;
use moviemaze_db::{UQ_USERS_EMAIL, UQ_VOTES_USER_MOVIE};

/// Message returned for every 500 unless internal details are exposed.
pub const REDACTED_MESSAGE: &str = "An internal error occurred";

/// Error code carried by every 500 body.
pub const INTERNAL_ERROR_CODE: &str = "INTERNAL_ERROR";

// PostgreSQL SQLSTATE codes.
const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Unredacted message of a 500 response, kept in the response extensions.
///
/// The body always carries [`REDACTED_MESSAGE`]; the
/// [`error_detail`](crate::middleware::error_detail) layer swaps this back in
/// when the server runs in development.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `moviemaze_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// No route matches the request path.
    #[error("Route not found")]
    RouteNotFound,

    /// Too many requests to the authentication endpoints.
    #[error("Authentication rate limit exceeded")]
    AuthRateLimited,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::DuplicateVote { .. } => (
                    StatusCode::CONFLICT,
                    "DUPLICATE_VOTE",
                    "A vote for this movie is already being recorded".to_string(),
                ),
                CoreError::DuplicateEmail(_) => (
                    StatusCode::CONFLICT,
                    "DUPLICATE_EMAIL",
                    "Email is already registered".to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_CODE, msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_CODE, msg.clone())
            }
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Route not found".to_string(),
            ),
            AppError::AuthRateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "AUTH_RATE_LIMIT_EXCEEDED",
                "Too many authentication attempts, please try again later".to_string(),
            ),
        };

        let (message, detail) = if status == StatusCode::INTERNAL_SERVER_ERROR {
            (REDACTED_MESSAGE.to_string(), Some(message))
        } else {
            (message, None)
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        let mut response = (status, axum::Json(body)).into_response();
        if let Some(detail) = detail {
            response.extensions_mut().insert(InternalErrorDetail(detail));
        }
        response
    }
}

// --- Extractor rejections ---
//
// Malformed paths, query strings and JSON bodies answer with the same
// `{error, code}` shape as every other failure.

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations map to 409, with dedicated codes for duplicate votes
///   and duplicate emails. Other constraints must start with `uq_`.
/// - Foreign-key violations map to 404 (the referenced row is gone).
/// - Everything else maps to 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint == UQ_VOTES_USER_MOVIE {
                        return (
                            StatusCode::CONFLICT,
                            "DUPLICATE_VOTE",
                            "A vote for this movie is already being recorded".to_string(),
                        );
                    }
                    if constraint == UQ_USERS_EMAIL {
                        return (
                            StatusCode::CONFLICT,
                            "DUPLICATE_EMAIL",
                            "Email is already registered".to_string(),
                        );
                    }
                    if constraint.starts_with("uq_") {
                        return (
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        );
                    }
                }
                Some(PG_FOREIGN_KEY_VIOLATION) => {
                    return (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        "Referenced resource not found".to_string(),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_CODE,
                db_err.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_CODE,
                other.to_string(),
            )
        }
    }
}
