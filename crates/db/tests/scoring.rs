//! Integration tests for the scoring aggregator.

mod common;

use sqlx::PgPool;
use moviemaze_core::voting::{VoteDirection, VoteTally};
use moviemaze_db::models::movie::MovieFilter;
use moviemaze_db::repositories::{MovieRepo, ScoringAggregator, UserRepo, VoteRepo};

use common::{create_movie, create_user, new_movie, set_created_at};

fn unfiltered() -> MovieFilter {
    MovieFilter {
        genre: None,
        year: None,
        added_by: None,
        limit: 50,
        offset: 0,
    }
}

/// Cast `ups` upvotes and `downs` downvotes from fresh users.
async fn cast_votes(pool: &PgPool, movie_id: i64, ups: usize, downs: usize, tag: &str) {
    for i in 0..ups {
        let voter = create_user(pool, &format!("{tag}Up{i}")).await;
        VoteRepo::cast(pool, voter.id, movie_id, VoteDirection::Upvote)
            .await
            .unwrap();
    }
    for i in 0..downs {
        let voter = create_user(pool, &format!("{tag}Down{i}")).await;
        VoteRepo::cast(pool, voter.id, movie_id, VoteDirection::Downvote)
            .await
            .unwrap();
    }
}

// ---------------------------------------------------------------------------
// score_one
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_score_one_reports_tally_and_author(pool: PgPool) {
    let owner = create_user(&pool, "Owner").await;
    let movie = create_movie(&pool, "Heat", owner.id).await;
    cast_votes(&pool, movie.id, 2, 1, "m").await;

    let detail = ScoringAggregator::score_one(&pool, movie.id)
        .await
        .unwrap()
        .expect("movie should be found");

    assert_eq!(detail.tally, VoteTally::new(2, 1));
    assert_eq!(detail.tally.score, 1);
    assert_eq!(detail.author.id, owner.id);
    assert_eq!(detail.author.name, "Owner");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_score_one_without_votes_is_zero(pool: PgPool) {
    let owner = create_user(&pool, "Owner").await;
    let movie = create_movie(&pool, "Heat", owner.id).await;

    let detail = ScoringAggregator::score_one(&pool, movie.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.tally, VoteTally::default());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_score_one_missing_movie(pool: PgPool) {
    let detail = ScoringAggregator::score_one(&pool, 424_242).await.unwrap();
    assert!(detail.is_none());
}

// ---------------------------------------------------------------------------
// score_many / top
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_orders_by_score_then_newest(pool: PgPool) {
    let owner = create_user(&pool, "Owner").await;
    let t1 = create_movie(&pool, "T1", owner.id).await;
    let t2 = create_movie(&pool, "T2", owner.id).await;
    let t3 = create_movie(&pool, "T3", owner.id).await;
    set_created_at(&pool, t1.id, 0).await;
    set_created_at(&pool, t2.id, 10).await;
    set_created_at(&pool, t3.id, 20).await;

    cast_votes(&pool, t1.id, 3, 0, "a").await;
    cast_votes(&pool, t2.id, 3, 0, "b").await;
    cast_votes(&pool, t3.id, 1, 0, "c").await;

    let listed = ScoringAggregator::score_many(&pool, &unfiltered())
        .await
        .unwrap();
    let ids: Vec<i64> = listed.iter().map(|s| s.movie.id).collect();
    assert_eq!(ids, vec![t2.id, t1.id, t3.id]);

    let scores: Vec<i64> = listed.iter().map(|s| s.tally.score).collect();
    assert_eq!(scores, vec![3, 3, 1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_breaks_full_ties_by_id(pool: PgPool) {
    let owner = create_user(&pool, "Owner").await;
    let first = create_movie(&pool, "First", owner.id).await;
    let second = create_movie(&pool, "Second", owner.id).await;
    set_created_at(&pool, first.id, 5).await;
    set_created_at(&pool, second.id, 5).await;

    let listed = ScoringAggregator::score_many(&pool, &unfiltered())
        .await
        .unwrap();
    let ids: Vec<i64> = listed.iter().map(|s| s.movie.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_includes_author_profile(pool: PgPool) {
    let owner = create_user(&pool, "Owner").await;
    create_movie(&pool, "Heat", owner.id).await;

    let listed = ScoringAggregator::score_many(&pool, &unfiltered())
        .await
        .unwrap();
    let author = listed[0].author.as_ref().expect("author should be joined");
    assert_eq!(author.id, owner.id);
    assert_eq!(author.email, "owner@example.com");
    assert_eq!(author.role, "user");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_filters(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let bob = create_user(&pool, "Bob").await;

    let mut scifi = new_movie("Arrival", alice.id);
    scifi.genres = vec!["Sci-Fi".to_string()];
    scifi.year = Some(2016);
    let scifi = MovieRepo::create(&pool, &scifi).await.unwrap();

    let mut drama = new_movie("Moonlight", bob.id);
    drama.genres = vec!["Drama".to_string()];
    drama.year = Some(2016);
    let drama = MovieRepo::create(&pool, &drama).await.unwrap();

    let by_genre = ScoringAggregator::score_many(
        &pool,
        &MovieFilter {
            genre: Some("Sci-Fi".to_string()),
            ..unfiltered()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_genre.len(), 1);
    assert_eq!(by_genre[0].movie.id, scifi.id);

    let by_year = ScoringAggregator::score_many(
        &pool,
        &MovieFilter {
            year: Some(2016),
            ..unfiltered()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_year.len(), 2);

    let by_author = ScoringAggregator::score_many(
        &pool,
        &MovieFilter {
            added_by: Some(bob.id),
            ..unfiltered()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].movie.id, drama.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_pagination(pool: PgPool) {
    let owner = create_user(&pool, "Owner").await;
    for i in 0..5 {
        let movie = create_movie(&pool, &format!("Movie {i}"), owner.id).await;
        set_created_at(&pool, movie.id, i).await;
    }

    let page = ScoringAggregator::score_many(
        &pool,
        &MovieFilter {
            limit: 2,
            offset: 2,
            ..unfiltered()
        },
    )
    .await
    .unwrap();
    let titles: Vec<&str> = page.iter().map(|s| s.movie.title.as_str()).collect();
    assert_eq!(titles, vec!["Movie 2", "Movie 1"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_respects_limit(pool: PgPool) {
    let owner = create_user(&pool, "Owner").await;
    let mut best = None;
    for i in 0..4 {
        let movie = create_movie(&pool, &format!("Movie {i}"), owner.id).await;
        if i == 1 {
            best = Some(movie.id);
        }
    }
    cast_votes(&pool, best.unwrap(), 2, 0, "top").await;

    let top = ScoringAggregator::top(&pool, 3).await.unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(Some(top[0].movie.id), best);
    assert_eq!(top[0].tally.score, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_email_is_case_insensitive(pool: PgPool) {
    let user = create_user(&pool, "Alice").await;

    let found = UserRepo::find_by_email(&pool, "  ALICE@Example.com ")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
}
