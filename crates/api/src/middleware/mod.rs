//! Request extractors and response layers shared by the handlers.
//!
//! - [`auth::AuthUser`] -- the caller, from a bearer token or session cookie.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`error_detail`] -- restores 500 detail in development.
//! - [`rate_limit`] -- per-IP limit on the `/auth` endpoints.

pub mod auth;
pub mod error_detail;
pub mod rate_limit;
pub mod rbac;
