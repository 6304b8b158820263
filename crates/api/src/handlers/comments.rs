//! Handlers for the `/comments` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use moviemaze_core::error::CoreError;
use moviemaze_core::types::DbId;
use moviemaze_core::validation::validate_comment_body;
use moviemaze_db::models::comment::{CommentWithAuthor, CreateComment};
use moviemaze_db::repositories::{CommentRepo, MovieRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, Path};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(alias = "movieId")]
    pub movie_id: DbId,
    pub body: String,
}

/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentWithAuthor>>)> {
    let body = validate_comment_body(&input.body)?;

    if !MovieRepo::exists(&state.pool, input.movie_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: input.movie_id,
        }));
    }

    let create = CreateComment {
        user_id: user.user_id,
        movie_id: input.movie_id,
        body,
    };
    let comment = CommentRepo::create(&state.pool, &create).await?;

    tracing::info!(
        comment_id = comment.comment.id,
        movie_id = input.movie_id,
        user_id = user.user_id,
        "Comment created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/comments/movie/{movie_id}
///
/// Oldest first. An unknown movie yields an empty list.
pub async fn list_movie_comments(
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithAuthor>>>> {
    let comments = CommentRepo::list_by_movie(&state.pool, movie_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// DELETE /api/comments/{id}
///
/// Only the comment's author or an admin may delete it.
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    if comment.user_id != user.user_id && !user.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to delete this comment".into(),
        )));
    }

    CommentRepo::delete(&state.pool, id).await?;

    tracing::info!(comment_id = id, user_id = user.user_id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}
