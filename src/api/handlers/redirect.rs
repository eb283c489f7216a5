//! Handler for redirect resolution.

use axum::{Json, extract::State};

use crate::api::dto::redirect::RedirectResponse;
use crate::api::middleware::ApiPath;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves an alias to its target URL and, when available, one published ad.
///
/// # Endpoint
///
/// `GET /link/{alias}`
///
/// # Response
///
/// ```json
/// { "url": "https://example.com", "ad": { "id": 1, "title": "...", "text": "..." } }
/// ```
///
/// `ad` is `null` when the link has no ads, none are published, or the ads
/// lookup fails.
///
/// # Errors
///
/// Returns 404 Not Found if the alias is free.
pub async fn redirect_handler(
    ApiPath(alias): ApiPath<String>,
    State(state): State<AppState>,
) -> Result<Json<RedirectResponse>, AppError> {
    let redirect = state.shortener.get_redirect(&alias).await?;
    Ok(Json(redirect.into()))
}
