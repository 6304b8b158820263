//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::config::AuthRateLimit;
use crate::handlers::auth;
use crate::middleware::rate_limit::limit_auth_routes;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup   -> signup
/// POST /login    -> login
/// POST /logout   -> logout (clears the session cookie)
/// GET  /me       -> me (requires auth)
/// ```
///
/// All four share the per-IP `rate_limit` when one is configured.
pub fn router(rate_limit: Option<AuthRateLimit>) -> Router<AppState> {
    let routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me));
    limit_auth_routes(routes, rate_limit)
}
