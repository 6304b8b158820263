//! Vote entity model.

use serde::Serialize;
use sqlx::FromRow;
use moviemaze_core::types::{DbId, Timestamp};

/// A vote row from the `votes` table. `vote_type` is `1` or `-1`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub vote_type: i16,
    pub created_at: Timestamp,
}
