//! Response layer that decides how much of a 500 the client sees.
//!
//! [`AppError`](crate::error::AppError) always renders the redacted message
//! and stashes the real one in an [`InternalErrorDetail`] extension. This
//! layer reads the per-router [`ServerConfig`](crate::config::ServerConfig)
//! from state and restores the detail in development only.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::{InternalErrorDetail, INTERNAL_ERROR_CODE};
use crate::state::AppState;

/// Used with `axum::middleware::map_response_with_state`.
pub async fn reveal_internal_errors(
    State(state): State<AppState>,
    response: Response,
) -> Response {
    restore_internal_detail(response, state.config.is_development())
}

/// Strip the [`InternalErrorDetail`] extension and, when `expose` is set,
/// rebuild the body around it.
pub fn restore_internal_detail(mut response: Response, expose: bool) -> Response {
    let Some(InternalErrorDetail(detail)) =
        response.extensions_mut().remove::<InternalErrorDetail>()
    else {
        return response;
    };
    if !expose {
        return response;
    }

    let body = json!({
        "error": detail,
        "code": INTERNAL_ERROR_CODE,
    });
    (response.status(), axum::Json(body)).into_response()
}
