//! Comment entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use moviemaze_core::types::{DbId, Timestamp};

use super::user::UserContact;

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment. `body` must already be validated.
#[derive(Debug)]
pub struct CreateComment {
    pub user_id: DbId,
    pub movie_id: DbId,
    pub body: String,
}

/// A comment joined with its author's name and email.
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: UserContact,
}

/// Flat join row backing [`CommentWithAuthor`].
#[derive(Debug, FromRow)]
pub(crate) struct CommentAuthorRow {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_name: String,
    pub author_email: String,
}

impl CommentAuthorRow {
    pub(crate) fn into_comment(self) -> CommentWithAuthor {
        CommentWithAuthor {
            author: UserContact {
                id: self.user_id,
                name: self.author_name,
                email: self.author_email,
            },
            comment: Comment {
                id: self.id,
                user_id: self.user_id,
                movie_id: self.movie_id,
                body: self.body,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}
