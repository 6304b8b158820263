//! Shared query parameter types for API handlers.
//!
//! Paging values are clamped in the handler via `clamp_limit` / `clamp_offset`.

use serde::Deserialize;
use moviemaze_core::types::DbId;

/// Query parameters for `GET /movies`.
#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub added_by: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A bare `?limit=` parameter for leaderboard-style endpoints.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
