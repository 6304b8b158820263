//! Populate a development database with sample users, movies, votes, and
//! comments.
//!
//! Wipes every table first. All seeded accounts share the password
//! `password123`.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moviemaze_api::auth::password::hash_password;
use moviemaze_core::roles::{ROLE_ADMIN, ROLE_USER};
use moviemaze_core::voting::VoteDirection;
use moviemaze_db::models::comment::CreateComment;
use moviemaze_db::models::movie::CreateMovie;
use moviemaze_db::models::user::{CreateUser, User};
use moviemaze_db::repositories::{CommentRepo, MovieRepo, UserRepo, VoteRepo};
use moviemaze_db::DbPool;

const SEED_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moviemaze_seed=info,moviemaze_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = moviemaze_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    moviemaze_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Starting database seeding");
    seed(&pool).await?;
    tracing::info!("Database seeding completed");

    pool.close().await;
    Ok(())
}

async fn seed(pool: &DbPool) -> anyhow::Result<()> {
    // Children first so foreign keys never dangle.
    for table in ["comments", "votes", "movies", "users"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await
            .with_context(|| format!("Failed to clear {table}"))?;
    }

    create_user(pool, "Admin User", "admin@example.com", ROLE_ADMIN).await?;
    let john = create_user(pool, "John Doe", "john@example.com", ROLE_USER).await?;
    let jane = create_user(pool, "Jane Smith", "jane@example.com", ROLE_USER).await?;

    let inception = MovieRepo::create(
        pool,
        &CreateMovie {
            title: "Inception".into(),
            description: "A thief who steals corporate secrets through the use of dream-sharing \
                          technology is given the inverse task of planting an idea into the \
                          mind of a C.E.O."
                .into(),
            images: vec![],
            genres: vec![],
            year: None,
            added_by: john.id,
        },
    )
    .await?;

    let matrix = MovieRepo::create(
        pool,
        &CreateMovie {
            title: "The Matrix".into(),
            description: "A computer hacker learns from mysterious rebels about the true nature \
                          of his reality and his role in the war against its controllers."
                .into(),
            images: vec![],
            genres: vec!["Action".into(), "Sci-Fi".into()],
            year: Some(1999),
            added_by: jane.id,
        },
    )
    .await?;

    let interstellar = MovieRepo::create(
        pool,
        &CreateMovie {
            title: "Interstellar".into(),
            description: "A team of explorers travel through a wormhole in space in an attempt \
                          to ensure humanity's survival."
                .into(),
            images: vec![],
            genres: vec!["Adventure".into(), "Drama".into(), "Sci-Fi".into()],
            year: Some(2014),
            added_by: john.id,
        },
    )
    .await?;
    tracing::info!(
        movies = ?[inception.id, matrix.id, interstellar.id],
        "Seeded movies"
    );

    for (user_id, movie_id) in [
        (john.id, matrix.id),
        (jane.id, matrix.id),
        (john.id, interstellar.id),
    ] {
        VoteRepo::cast(pool, user_id, movie_id, VoteDirection::Upvote).await?;
    }

    for (user_id, movie_id, body) in [
        (
            john.id,
            matrix.id,
            "This movie changed my perspective on reality!",
        ),
        (
            jane.id,
            interstellar.id,
            "Christopher Nolan at his best. The sound design is incredible.",
        ),
    ] {
        CommentRepo::create(
            pool,
            &CreateComment {
                user_id,
                movie_id,
                body: body.into(),
            },
        )
        .await?;
    }

    Ok(())
}

async fn create_user(
    pool: &DbPool,
    name: &str,
    email: &str,
    role: &str,
) -> anyhow::Result<User> {
    let password_hash = hash_password(SEED_PASSWORD)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.into(),
            email: email.into(),
            password_hash,
            role: role.into(),
        },
    )
    .await
    .with_context(|| format!("Failed to create user {email}"))?;
    tracing::info!(user_id = user.id, %email, role, "Seeded user");
    Ok(user)
}
