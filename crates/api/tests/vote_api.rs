//! HTTP-level integration tests for the vote endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

fn votes_uri(movie_id: i64) -> String {
    format!("/api/votes/{movie_id}")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vote_lifecycle(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "voter", "user").await;
    let movie = common::create_movie(&pool, "Heat", user.id).await;
    let app = common::build_test_app(pool);
    let uri = votes_uri(movie.id);

    // No vote yet.
    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["vote"].is_null());

    // Upvote twice: still a single upvote.
    for _ in 0..2 {
        let response =
            post_json_auth(app.clone(), &uri, json!({ "vote_type": "upvote" }), &token).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"], json!({ "upvotes": 1, "downvotes": 0, "score": 1 }));
    }

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(body_json(response).await["data"]["vote"], 1);

    // Switch to a downvote.
    let response =
        post_json_auth(app.clone(), &uri, json!({ "voteType": "downvote" }), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"], json!({ "upvotes": 0, "downvotes": 1, "score": -1 }));

    // Remove it.
    let response =
        post_json_auth(app.clone(), &uri, json!({ "vote_type": "remove" }), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"], json!({ "upvotes": 0, "downvotes": 0, "score": 0 }));

    let response = get_auth(app, &uri, &token).await;
    assert!(body_json(response).await["data"]["vote"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_two_up_one_down_scores_one(pool: PgPool) {
    let (owner, _) = common::create_user(&pool, "owner", "user").await;
    let movie = common::create_movie(&pool, "Heat", owner.id).await;
    let mut tokens = Vec::new();
    for name in ["a", "b", "c"] {
        tokens.push(common::create_user(&pool, name, "user").await.1);
    }
    let app = common::build_test_app(pool);
    let uri = votes_uri(movie.id);

    for (token, direction) in tokens.iter().zip(["upvote", "upvote", "downvote"]) {
        let response =
            post_json_auth(app.clone(), &uri, json!({ "vote_type": direction }), token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(app, &format!("/api/movies/{}", movie.id)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["upvotes"], 2);
    assert_eq!(json["data"]["downvotes"], 1);
    assert_eq!(json["data"]["score"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_vote_type_is_rejected(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "voter", "user").await;
    let movie = common::create_movie(&pool, "Heat", user.id).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        &votes_uri(movie.id),
        json!({ "vote_type": "sideways" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vote_on_missing_movie_is_404(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "voter", "user").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        &votes_uri(999_999),
        json!({ "vote_type": "upvote" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_votes_require_auth(pool: PgPool) {
    let (user, _) = common::create_user(&pool, "voter", "user").await;
    let movie = common::create_movie(&pool, "Heat", user.id).await;
    let app = common::build_test_app(pool);

    let response = get(app, &votes_uri(movie.id)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
