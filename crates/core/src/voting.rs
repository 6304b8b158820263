//! Vote directions, stored vote values, and derived tallies.
//!
//! A stored vote is a single `SMALLINT` of `+1` or `-1`. Clients submit a
//! direction (`upvote`, `downvote`, `remove`); the ledger replaces any
//! existing vote for the (user, movie) pair with the new one, so submitting
//! the same direction twice leaves exactly one vote.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Stored value of an upvote.
pub const UPVOTE: i16 = 1;

/// Stored value of a downvote.
pub const DOWNVOTE: i16 = -1;

const VALID_DIRECTIONS: &[&str] = &["upvote", "downvote", "remove"];

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// What a caller asks the ledger to do with their vote on a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Upvote,
    Downvote,
    Remove,
}

impl VoteDirection {
    /// Parse the wire value (`"upvote"`, `"downvote"`, `"remove"`).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "upvote" => Ok(Self::Upvote),
            "downvote" => Ok(Self::Downvote),
            "remove" => Ok(Self::Remove),
            other => Err(CoreError::Validation(format!(
                "Invalid vote type '{other}'. Must be one of: {VALID_DIRECTIONS:?}"
            ))),
        }
    }

    /// The value to insert after clearing the old vote, or `None` for `Remove`.
    pub fn stored_value(self) -> Option<i16> {
        match self {
            Self::Upvote => Some(UPVOTE),
            Self::Downvote => Some(DOWNVOTE),
            Self::Remove => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
            Self::Remove => "remove",
        }
    }
}

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Aggregate counts for a single movie, computed from the vote rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub upvotes: i64,
    pub downvotes: i64,
    /// Always `upvotes - downvotes`.
    pub score: i64,
}

impl VoteTally {
    pub fn new(upvotes: i64, downvotes: i64) -> Self {
        Self {
            upvotes,
            downvotes,
            score: upvotes - downvotes,
        }
    }
}
