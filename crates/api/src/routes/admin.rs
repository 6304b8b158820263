//! Route definitions for the `/admin` resource. Every route requires the
//! `admin` role.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// DELETE /movies/{id}   -> delete_movie
/// GET    /top-movies    -> top_movies
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies/{id}", delete(admin::delete_movie))
        .route("/top-movies", get(admin::top_movies))
}
