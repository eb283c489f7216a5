//! Caller identity extractor.
//!
//! An upstream gateway authenticates the caller and forwards the author id in
//! the `X-Author-Id` header. Handlers that act on behalf of an author take
//! [`AuthorId`] as an argument.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde_json::json;

use crate::error::AppError;

/// Header carrying the authenticated author id.
pub const AUTHOR_HEADER: &str = "x-author-id";

/// Authenticated author id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorId(pub i64);

impl<S> FromRequestParts<S> for AuthorId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(AUTHOR_HEADER).ok_or_else(|| {
            AppError::unauthenticated(
                "Unauthenticated",
                json!({ "reason": "X-Author-Id header is missing" }),
            )
        })?;

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(AuthorId)
            .ok_or_else(|| {
                AppError::unauthenticated(
                    "Unauthenticated",
                    json!({ "reason": "X-Author-Id header is not a valid id" }),
                )
            })
    }
}
