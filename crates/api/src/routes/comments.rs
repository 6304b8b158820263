//! Route definitions for the `/comments` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// POST   /                  -> create_comment (requires auth)
/// GET    /movie/{movie_id}  -> list_movie_comments
/// DELETE /{id}              -> delete_comment (author or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(comments::create_comment))
        .route("/movie/{movie_id}", get(comments::list_movie_comments))
        .route("/{id}", delete(comments::delete_comment))
}
