//! Handlers for the `/votes` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use moviemaze_core::error::CoreError;
use moviemaze_core::types::DbId;
use moviemaze_core::voting::{VoteDirection, VoteTally};
use moviemaze_db::repositories::{MovieRepo, VoteRepo};
use moviemaze_db::{is_unique_violation, UQ_VOTES_USER_MOVIE};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, Path};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /votes/{movie_id}`.
#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    #[serde(alias = "voteType")]
    pub vote_type: String,
}

/// The caller's current vote on a movie.
#[derive(Debug, Serialize)]
pub struct VoteStatus {
    /// `1`, `-1`, or `null` when the caller has not voted.
    pub vote: Option<i16>,
}

/// GET /api/votes/{movie_id}
pub async fn get_vote(
    State(state): State<AppState>,
    user: AuthUser,
    Path(movie_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoteStatus>>> {
    let vote = VoteRepo::find(&state.pool, user.user_id, movie_id).await?;
    Ok(Json(DataResponse {
        data: VoteStatus {
            vote: vote.map(|v| v.vote_type),
        },
    }))
}

/// POST /api/votes/{movie_id}
///
/// Replace the caller's vote with `upvote`, `downvote`, or nothing
/// (`remove`) and return the movie's recomputed tally.
pub async fn cast_vote(
    State(state): State<AppState>,
    user: AuthUser,
    Path(movie_id): Path<DbId>,
    JsonBody(input): JsonBody<CastVoteRequest>,
) -> AppResult<Json<DataResponse<VoteTally>>> {
    let direction = VoteDirection::parse(&input.vote_type)?;

    if !MovieRepo::exists(&state.pool, movie_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        }));
    }

    let tally = VoteRepo::cast(&state.pool, user.user_id, movie_id, direction)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, UQ_VOTES_USER_MOVIE) {
                tracing::warn!(
                    user_id = user.user_id,
                    movie_id,
                    "Concurrent vote for the same movie rejected"
                );
                AppError::Core(CoreError::DuplicateVote {
                    user_id: user.user_id,
                    movie_id,
                })
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(
        user_id = user.user_id,
        movie_id,
        direction = direction.as_str(),
        score = tally.score,
        "Vote cast"
    );

    Ok(Json(DataResponse { data: tally }))
}
