//! Route definitions for the `/votes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::votes;
use crate::state::AppState;

/// Routes mounted at `/votes`. Both require auth.
///
/// ```text
/// GET  /{movie_id}   -> get_vote
/// POST /{movie_id}   -> cast_vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{movie_id}",
        get(votes::get_vote).post(votes::cast_vote),
    )
}
