//! Movie entity model, DTOs, and scored read models.
//!
//! Scores are never stored. [`ScoredMovie`] and [`MovieDetail`] are built
//! from a single aggregate query over `movies`, `votes`, and `users`; see
//! [`crate::repositories::ScoringAggregator`].

use serde::Serialize;
use sqlx::FromRow;
use moviemaze_core::types::{DbId, Timestamp};
use moviemaze_core::voting::VoteTally;

use super::user::{UserResponse, UserSummary};

/// A movie row from the `movies` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub genres: Vec<String>,
    pub year: Option<i32>,
    /// Id of the user who submitted the movie.
    pub added_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a movie. Fields must already be validated.
#[derive(Debug, Clone)]
pub struct CreateMovie {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub genres: Vec<String>,
    pub year: Option<i32>,
    pub added_by: DbId,
}

/// Optional filters and paging for scored listings.
///
/// `limit` and `offset` are expected to be clamped by the caller.
#[derive(Debug, Clone)]
pub struct MovieFilter {
    /// Exact, case-sensitive match against one of the movie's genres.
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub added_by: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}

/// Counts removed alongside a movie by a cascading delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MovieDeletion {
    pub movie_id: DbId,
    pub votes_deleted: u64,
    pub comments_deleted: u64,
}

/// Listing view: movie, vote counts, and the author's public profile.
///
/// `author` is `None` only if the author row is missing.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredMovie {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(flatten)]
    pub tally: VoteTally,
    pub author: Option<UserResponse>,
}

/// Single-movie view: the author is reduced to id and name.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(flatten)]
    pub tally: VoteTally,
    pub author: UserSummary,
}

/// Flat aggregate row shared by both scored views.
#[derive(Debug, FromRow)]
pub(crate) struct ScoredMovieRow {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub genres: Vec<String>,
    pub year: Option<i32>,
    pub added_by: DbId,
    pub created_at: Timestamp,
    pub upvotes: i64,
    pub downvotes: i64,
    pub author_id: Option<DbId>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub author_role: Option<String>,
    pub author_created_at: Option<Timestamp>,
}

impl ScoredMovieRow {
    fn split(self) -> (Movie, VoteTally, AuthorColumns) {
        let movie = Movie {
            id: self.id,
            title: self.title,
            description: self.description,
            images: self.images,
            genres: self.genres,
            year: self.year,
            added_by: self.added_by,
            created_at: self.created_at,
        };
        let tally = VoteTally::new(self.upvotes, self.downvotes);
        let author = AuthorColumns {
            id: self.author_id,
            name: self.author_name,
            email: self.author_email,
            role: self.author_role,
            created_at: self.author_created_at,
        };
        (movie, tally, author)
    }

    pub(crate) fn into_scored(self) -> ScoredMovie {
        let (movie, tally, author) = self.split();
        let author = match author {
            AuthorColumns {
                id: Some(id),
                name: Some(name),
                email: Some(email),
                role: Some(role),
                created_at: Some(created_at),
            } => Some(UserResponse {
                id,
                name,
                email,
                role,
                created_at,
            }),
            _ => None,
        };
        ScoredMovie {
            movie,
            tally,
            author,
        }
    }

    /// Returns `None` when the author row is missing.
    pub(crate) fn into_detail(self) -> Option<MovieDetail> {
        let (movie, tally, author) = self.split();
        let author = UserSummary {
            id: author.id?,
            name: author.name?,
        };
        Some(MovieDetail {
            movie,
            tally,
            author,
        })
    }
}

struct AuthorColumns {
    id: Option<DbId>,
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
    created_at: Option<Timestamp>,
}
