//! Handlers for the `/movies` resource.
//!
//! Reads go through the scoring aggregator so every movie carries its live
//! vote counts. Creation accepts a multipart form with an optional image.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Datelike;
use moviemaze_core::error::CoreError;
use moviemaze_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use moviemaze_core::types::DbId;
use moviemaze_core::validation::{
    normalize_genres, validate_description, validate_release_year, validate_title,
};
use moviemaze_db::models::movie::{CreateMovie, Movie, MovieDetail, MovieFilter, ScoredMovie};
use moviemaze_db::repositories::{MovieRepo, ScoringAggregator};

use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query};
use crate::middleware::auth::AuthUser;
use crate::query::MovieListParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::image_extension;

/// Multipart text fields accepted by `POST /movies`.
#[derive(Debug, Default)]
struct MovieForm {
    title: Option<String>,
    description: Option<String>,
    genres: Option<String>,
    year: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

/// GET /api/movies
///
/// All movies, highest score first. Supports `genre`, `year`, `added_by`,
/// `limit`, and `offset` query parameters.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<Json<DataResponse<Vec<ScoredMovie>>>> {
    let filter = MovieFilter {
        genre: params.genre,
        year: params.year,
        added_by: params.added_by,
        limit: clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let movies = ScoringAggregator::score_many(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// GET /api/movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MovieDetail>>> {
    let movie = ScoringAggregator::score_one(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }))?;
    Ok(Json(DataResponse { data: movie }))
}

/// POST /api/movies
///
/// Multipart fields: `title`, `description` (required), `genres` (JSON array
/// of strings), `year`, and an optional single `image` file.
pub async fn create_movie(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Movie>>)> {
    let mut form = MovieForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty part when no file is chosen.
                if !data.is_empty() {
                    form.image = Some((content_type, data.to_vec()));
                }
            }
            "title" | "description" | "genres" | "year" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                match name.as_str() {
                    "title" => form.title = Some(text),
                    "description" => form.description = Some(text),
                    "genres" => form.genres = Some(text),
                    _ => form.year = Some(text),
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let title = validate_title(form.title.as_deref().unwrap_or(""))?;
    let description = validate_description(form.description.as_deref().unwrap_or(""))?;
    let genres = parse_genres(form.genres.as_deref())?;
    let year = parse_year(form.year.as_deref(), chrono::Utc::now().year())?;

    let mut images = Vec::new();
    if let Some((content_type, data)) = form.image {
        if image_extension(&content_type).is_none() {
            return Err(AppError::Core(CoreError::Validation(
                "Only JPEG, PNG, and WebP images are allowed".into(),
            )));
        }
        if data.len() > state.config.max_upload_bytes {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Image exceeds the maximum size of {} bytes",
                state.config.max_upload_bytes
            ))));
        }
        let url = state
            .images
            .save(data, &content_type)
            .await
            .map_err(|e| AppError::InternalError(format!("Image storage error: {e:#}")))?;
        images.push(url);
    }

    let input = CreateMovie {
        title,
        description,
        images,
        genres,
        year,
        added_by: user.user_id,
    };
    let movie = match MovieRepo::create(&state.pool, &input).await {
        Ok(movie) => movie,
        Err(e) => {
            discard_images(&state, &input.images).await;
            return Err(e.into());
        }
    };

    tracing::info!(movie_id = movie.id, user_id = user.user_id, "Movie created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// Best-effort removal of images whose movie was never stored.
async fn discard_images(state: &AppState, urls: &[String]) {
    for url in urls {
        if let Err(e) = state.images.remove(url).await {
            tracing::warn!(url = %url, error = ?e, "Failed to remove orphaned image");
        }
    }
}

// ---------------------------------------------------------------------------
// Form parsing
// ---------------------------------------------------------------------------

/// Parse the `genres` field: a JSON array of strings. Blank means none.
fn parse_genres(raw: Option<&str>) -> Result<Vec<String>, CoreError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(raw) => raw,
    };
    let genres: Vec<String> = serde_json::from_str(raw).map_err(|_| {
        CoreError::Validation("Genres must be a JSON array of strings".into())
    })?;
    Ok(normalize_genres(genres))
}

/// Parse the optional `year` field and check it against the allowed range.
fn parse_year(raw: Option<&str>, current_year: i32) -> Result<Option<i32>, CoreError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    let year: i32 = raw
        .parse()
        .map_err(|_| CoreError::Validation(format!("Year '{raw}' is not a number")))?;
    validate_release_year(year, current_year)?;
    Ok(Some(year))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_parse_genres() {
        assert_eq!(parse_genres(None).unwrap(), Vec::<String>::new());
        assert_eq!(parse_genres(Some("  ")).unwrap(), Vec::<String>::new());
        assert_eq!(
            parse_genres(Some(r#"[" Drama ", "", "Sci-Fi"]"#)).unwrap(),
            vec!["Drama".to_string(), "Sci-Fi".to_string()]
        );
        assert_matches!(parse_genres(Some("Drama")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(None, 2025).unwrap(), None);
        assert_eq!(parse_year(Some(""), 2025).unwrap(), None);
        assert_eq!(parse_year(Some("1999"), 2025).unwrap(), Some(1999));
        assert_eq!(parse_year(Some("2030"), 2025).unwrap(), Some(2030));
        assert_matches!(parse_year(Some("2031"), 2025), Err(CoreError::Validation(_)));
        assert_matches!(parse_year(Some("1899"), 2025), Err(CoreError::Validation(_)));
        assert_matches!(parse_year(Some("soon"), 2025), Err(CoreError::Validation(_)));
    }
}
