//! Per-client-IP token bucket in front of the `/auth` endpoints.
//!
//! Behind a proxy the client IP comes from `X-Forwarded-For`, `X-Real-Ip` or
//! `Forwarded`; otherwise from the peer address, which requires serving with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::SmartIpKeyExtractor;
use tower_governor::GovernorLayer;

use crate::config::AuthRateLimit;
use crate::error::AppError;
use crate::state::AppState;

/// Wrap `router` in the rate limit, or return it unchanged when `limit` is
/// `None`.
pub fn limit_auth_routes(
    router: Router<AppState>,
    limit: Option<AuthRateLimit>,
) -> Router<AppState> {
    let Some(limit) = limit else {
        return router;
    };

    let period =
        (Duration::from_secs(limit.window_secs) / limit.burst).max(Duration::from_millis(1));
    let Some(config) = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .period(period)
        .burst_size(limit.burst)
        .finish()
    else {
        tracing::warn!(?limit, "Unusable auth rate limit, /auth left unlimited");
        return router;
    };

    router
        .layer(GovernorLayer {
            config: Arc::new(config),
        })
        .layer(axum::middleware::map_response(rate_limited_as_json))
}

/// Give governor's plain-text 429 the API's JSON error body, keeping its
/// `retry-after` headers.
async fn rate_limited_as_json(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let (json_parts, body) = AppError::AuthRateLimited.into_response().into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    if let Some(content_type) = json_parts.headers.get(CONTENT_TYPE) {
        parts.headers.insert(CONTENT_TYPE, content_type.clone());
    }
    Response::from_parts(parts, body)
}
