//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`cookie`] -- the httpOnly session cookie that carries the token.

pub mod cookie;
pub mod jwt;
pub mod password;
