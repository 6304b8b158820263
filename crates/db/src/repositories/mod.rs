//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod movie_repo;
pub mod scoring;
pub mod user_repo;
pub mod vote_repo;

pub use comment_repo::CommentRepo;
pub use movie_repo::MovieRepo;
pub use scoring::ScoringAggregator;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
