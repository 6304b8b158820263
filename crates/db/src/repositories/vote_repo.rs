//! The vote ledger: one vote per (user, movie), replaced on every submission.

use sqlx::PgPool;
use moviemaze_core::types::DbId;
use moviemaze_core::voting::{VoteDirection, VoteTally};

use crate::models::vote::Vote;

const COLUMNS: &str = "id, user_id, movie_id, vote_type, created_at";

pub struct VoteRepo;

impl VoteRepo {
    /// The user's current vote on a movie. Not having voted is `None`, not
    /// an error.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM votes WHERE user_id = $1 AND movie_id = $2");
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the caller's vote on a movie and return the movie's new tally.
    ///
    /// The old vote is deleted unconditionally, then a new one is inserted
    /// unless `direction` is `Remove`. Both statements share a transaction,
    /// so an aborted request never leaves the vote half-replaced. Two
    /// concurrent submissions for the same pair serialize on
    /// `uq_votes_user_movie`; the loser fails with a unique violation.
    pub async fn cast(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        direction: VoteDirection,
    ) -> Result<VoteTally, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM votes WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(&mut *tx)
            .await?;

        if let Some(vote_type) = direction.stored_value() {
            sqlx::query("INSERT INTO votes (user_id, movie_id, vote_type) VALUES ($1, $2, $3)")
                .bind(user_id)
                .bind(movie_id)
                .bind(vote_type)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Self::tally(pool, movie_id).await
    }

    /// Count up- and downvotes for a movie directly from the vote rows.
    pub async fn tally(pool: &PgPool, movie_id: DbId) -> Result<VoteTally, sqlx::Error> {
        let (upvotes, downvotes): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE vote_type = 1),
                    COUNT(*) FILTER (WHERE vote_type = -1)
             FROM votes WHERE movie_id = $1",
        )
        .bind(movie_id)
        .fetch_one(pool)
        .await?;
        Ok(VoteTally::new(upvotes, downvotes))
    }
}
