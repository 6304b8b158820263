//! Fixture builders shared by the repository integration tests.

#![allow(dead_code)]

use sqlx::PgPool;
use moviemaze_db::models::movie::{CreateMovie, Movie};
use moviemaze_db::models::user::{CreateUser, User};
use moviemaze_db::repositories::{MovieRepo, UserRepo};

pub async fn create_user(pool: &PgPool, name: &str) -> User {
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password_hash: "not-a-real-hash".to_string(),
        role: "user".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap()
}

pub fn new_movie(title: &str, added_by: i64) -> CreateMovie {
    CreateMovie {
        title: title.to_string(),
        description: format!("{title} description"),
        images: vec![],
        genres: vec![],
        year: None,
        added_by,
    }
}

pub async fn create_movie(pool: &PgPool, title: &str, added_by: i64) -> Movie {
    MovieRepo::create(pool, &new_movie(title, added_by))
        .await
        .unwrap()
}

/// Pin a movie's `created_at` to `minutes` minutes after a fixed instant.
pub async fn set_created_at(pool: &PgPool, movie_id: i64, minutes: i32) {
    sqlx::query(
        "UPDATE movies SET created_at = TIMESTAMPTZ '2025-01-01 00:00:00+00' + make_interval(mins => $2) \
         WHERE id = $1",
    )
    .bind(movie_id)
    .bind(minutes)
    .execute(pool)
    .await
    .unwrap();
}
