//! Request extractors whose rejections render as [`AppError`] JSON.
//!
//! Drop-in replacements for axum's `Path`, `Query` and `Json` extractors.
//! Responses still use [`axum::Json`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// Path parameters; a malformed segment (e.g. `/movies/abc`) is a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
