//! Score aggregation over movies, votes, and authors.
//!
//! Scores are derived on every read, never cached, so a listing always
//! reflects the vote rows committed before the query started.

use sqlx::PgPool;
use moviemaze_core::types::DbId;

use crate::models::movie::{MovieDetail, MovieFilter, ScoredMovie, ScoredMovieRow};

/// Movie columns, vote counts, and author columns for one grouped row.
///
/// Movies without votes still appear (LEFT JOIN), with zero counts. Movies
/// whose author row is gone also appear, with NULL author columns.
const SCORED_SELECT: &str = "\
    SELECT m.id, m.title, m.description, m.images, m.genres, m.year, m.added_by, m.created_at, \
           COUNT(v.id) FILTER (WHERE v.vote_type = 1) AS upvotes, \
           COUNT(v.id) FILTER (WHERE v.vote_type = -1) AS downvotes, \
           u.id AS author_id, u.name AS author_name, u.email AS author_email, \
           u.role AS author_role, u.created_at AS author_created_at \
    FROM movies m \
    LEFT JOIN votes v ON v.movie_id = m.id \
    LEFT JOIN users u ON u.id = m.added_by";

/// Highest score first, newest first among equal scores, then id as a
/// final stable tie-break.
const SCORE_ORDER: &str = "\
    ORDER BY (COUNT(v.id) FILTER (WHERE v.vote_type = 1) \
            - COUNT(v.id) FILTER (WHERE v.vote_type = -1)) DESC, \
             m.created_at DESC, m.id DESC";

pub struct ScoringAggregator;

impl ScoringAggregator {
    /// Single movie with its tally and a reduced author block.
    ///
    /// Returns `None` if the movie does not exist or its author is missing.
    pub async fn score_one(pool: &PgPool, movie_id: DbId) -> Result<Option<MovieDetail>, sqlx::Error> {
        let query = format!("{SCORED_SELECT} WHERE m.id = $1 GROUP BY m.id, u.id");
        let row = sqlx::query_as::<_, ScoredMovieRow>(&query)
            .bind(movie_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.and_then(ScoredMovieRow::into_detail))
    }

    /// Filtered, paginated listing ordered by score.
    pub async fn score_many(
        pool: &PgPool,
        filter: &MovieFilter,
    ) -> Result<Vec<ScoredMovie>, sqlx::Error> {
        let query = format!(
            "{SCORED_SELECT} \
             WHERE ($1::TEXT IS NULL OR $1 = ANY(m.genres)) \
               AND ($2::INTEGER IS NULL OR m.year = $2) \
               AND ($3::BIGINT IS NULL OR m.added_by = $3) \
             GROUP BY m.id, u.id \
             {SCORE_ORDER} \
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, ScoredMovieRow>(&query)
            .bind(filter.genre.as_deref())
            .bind(filter.year)
            .bind(filter.added_by)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ScoredMovieRow::into_scored).collect())
    }

    /// The `limit` highest-scoring movies, unfiltered.
    pub async fn top(pool: &PgPool, limit: i64) -> Result<Vec<ScoredMovie>, sqlx::Error> {
        let query = format!("{SCORED_SELECT} GROUP BY m.id, u.id {SCORE_ORDER} LIMIT $1");
        let rows = sqlx::query_as::<_, ScoredMovieRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ScoredMovieRow::into_scored).collect())
    }
}
