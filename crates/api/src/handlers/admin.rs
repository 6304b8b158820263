//! Handlers for the `/admin` resource (moderation and leaderboard).

use axum::extract::State;
use axum::Json;
use moviemaze_core::error::CoreError;
use moviemaze_core::pagination::{clamp_limit, DEFAULT_TOP_LIMIT, MAX_LIST_LIMIT};
use moviemaze_core::types::DbId;
use moviemaze_db::models::movie::{MovieDeletion, ScoredMovie};
use moviemaze_db::repositories::{MovieRepo, ScoringAggregator};

use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query};
use crate::middleware::rbac::RequireAdmin;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// DELETE /api/admin/movies/{id}
///
/// Delete a movie with all of its votes and comments.
pub async fn delete_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MovieDeletion>>> {
    let deletion = MovieRepo::delete_cascade(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }))?;

    tracing::info!(
        movie_id = id,
        admin_id = admin.user_id,
        votes_deleted = deletion.votes_deleted,
        comments_deleted = deletion.comments_deleted,
        "Movie deleted by admin"
    );

    Ok(Json(DataResponse { data: deletion }))
}

/// GET /api/admin/top-movies
///
/// Highest-scoring movies, ten by default.
pub async fn top_movies(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<ScoredMovie>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_TOP_LIMIT, MAX_LIST_LIMIT);
    let movies = ScoringAggregator::top(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: movies }))
}
