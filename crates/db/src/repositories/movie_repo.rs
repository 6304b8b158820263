//! Repository for the `movies` table.
//!
//! Read paths that need vote counts go through
//! [`ScoringAggregator`](super::ScoringAggregator) instead.

use sqlx::PgPool;
use moviemaze_core::types::DbId;

use crate::models::movie::{CreateMovie, Movie, MovieDeletion};

const COLUMNS: &str = "id, title, description, images, genres, year, added_by, created_at";

pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, description, images, genres, year, added_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.images)
            .bind(&input.genres)
            .bind(input.year)
            .bind(input.added_by)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by ID without vote counts.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Delete a movie together with every vote and comment referencing it.
    ///
    /// Runs in one transaction in the order votes, comments, movie. The movie
    /// row is locked first so concurrent votes or comments on it block and
    /// then fail their foreign-key check. Returns `None` if no such movie.
    pub async fn delete_cascade(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MovieDeletion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM movies WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let votes_deleted = sqlx::query("DELETE FROM votes WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let comments_deleted = sqlx::query("DELETE FROM comments WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            movie_id = id,
            votes_deleted,
            comments_deleted,
            "Movie deleted with dependents"
        );

        Ok(Some(MovieDeletion {
            movie_id: id,
            votes_deleted,
            comments_deleted,
        }))
    }
}
