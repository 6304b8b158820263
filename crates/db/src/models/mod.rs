//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Any response shapes derived from that entity

pub mod comment;
pub mod movie;
pub mod user;
pub mod vote;
