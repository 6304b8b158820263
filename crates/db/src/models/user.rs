//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use moviemaze_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// Safe user representation (no password hash).
///
/// Also used as the author block of movie listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Author block on the single-movie view: no contact details or role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
}

/// Author block on comments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserContact {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// DTO for creating a new user. `email` must already be normalized.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
