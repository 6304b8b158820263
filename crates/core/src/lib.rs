//! Domain types, error taxonomy, and pure business rules shared by the
//! database and API crates.

pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;
pub mod voting;
