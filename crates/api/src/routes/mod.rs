pub mod admin;
pub mod auth;
pub mod comments;
pub mod health;
pub mod movies;
pub mod votes;

use axum::Router;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      register (public)
/// /auth/login                       login (public)
/// /auth/logout                      logout (clears the session cookie)
/// /auth/me                          current user (requires auth)
///
/// /movies                           list (public), create (requires auth)
/// /movies/{id}                      detail (public)
///
/// /votes/{movie_id}                 own vote, cast vote (requires auth)
///
/// /comments                         create (requires auth)
/// /comments/movie/{movie_id}        list for movie (public)
/// /comments/{id}                    delete (author or admin)
///
/// /admin/movies/{id}                cascading delete (admin only)
/// /admin/top-movies                 leaderboard (admin only)
/// ```
///
/// Anything else under `/api` is a JSON 404.
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(config.auth_rate_limit))
        .nest("/movies", movies::router())
        .nest("/votes", votes::router())
        .nest("/comments", comments::router())
        .nest("/admin", admin::router())
        .fallback(unknown_api_route)
}

async fn unknown_api_route() -> AppError {
    AppError::RouteNotFound
}
