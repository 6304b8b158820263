use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A second vote for the same (user, movie) pair hit the unique constraint.
    #[error("Duplicate vote by user {user_id} on movie {movie_id}")]
    DuplicateVote { user_id: DbId, movie_id: DbId },

    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
