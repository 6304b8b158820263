//! Repository for the `comments` table.

use sqlx::PgPool;
use moviemaze_core::types::DbId;

use crate::models::comment::{Comment, CommentAuthorRow, CommentWithAuthor, CreateComment};

const COLUMNS: &str = "id, user_id, movie_id, body, created_at, updated_at";

/// Comment columns joined with the author's name and email.
const JOINED_SELECT: &str = "SELECT c.id, c.user_id, c.movie_id, c.body, c.created_at, c.updated_at, \
                                    u.name AS author_name, u.email AS author_email \
                             FROM comments c \
                             JOIN users u ON u.id = c.user_id";

pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment and return it with its author.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComment,
    ) -> Result<CommentWithAuthor, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO comments (user_id, movie_id, body) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(input.user_id)
        .bind(input.movie_id)
        .bind(&input.body)
        .fetch_one(pool)
        .await?;

        let query = format!("{JOINED_SELECT} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CommentAuthorRow>(&query)
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.into_comment())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All comments on a movie, oldest first.
    pub async fn list_by_movie(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE c.movie_id = $1 ORDER BY c.created_at ASC, c.id ASC");
        let rows = sqlx::query_as::<_, CommentAuthorRow>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CommentAuthorRow::into_comment).collect())
    }

    /// Delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
