//! Handlers for link management endpoints.
//!
//! Every handler here acts on behalf of the author named by `X-Author-Id`.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{
    AdRequest, CreateLinkRequest, LinkListResponse, LinkResponse, UpdateAliasRequest,
};
use crate::api::middleware::{ApiJson, ApiPath, AuthorId};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "alias": "my-link",  // optional, generated when absent or empty
///   "ads": [1, 2]        // optional
/// }
/// ```
///
/// # Errors
///
/// - 400 if the URL is empty or longer than 2048 characters
/// - 404 if an ad id does not exist
/// - 409 if the alias is taken
pub async fn create_link_handler(
    State(state): State<AppState>,
    AuthorId(author_id): AuthorId,
    ApiJson(payload): ApiJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .shortener
        .create(payload.url, payload.alias, author_id, payload.ads)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists the caller's links.
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    AuthorId(author_id): AuthorId,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.shortener.get_by_author(author_id).await?;

    Ok(Json(LinkListResponse {
        links: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

/// Returns one of the caller's links.
///
/// `GET /api/links/{id}`
///
/// # Errors
///
/// - 403 if the link belongs to another author
/// - 404 if the link does not exist
pub async fn get_link_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    AuthorId(author_id): AuthorId,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.shortener.get_by_id(id).await?;

    if link.author_id != author_id {
        return Err(AppError::permission_denied(
            "Permission denied",
            json!({ "link_id": id }),
        ));
    }

    Ok(Json(link.into()))
}

/// Renames a link, or regenerates its alias when none is given.
///
/// `PUT /api/links/{id}`
pub async fn update_alias_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    AuthorId(author_id): AuthorId,
    ApiJson(payload): ApiJson<UpdateAliasRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .shortener
        .update_alias(id, author_id, payload.alias)
        .await?;

    Ok(Json(link.into()))
}

/// Deletes a link and its ad associations.
///
/// `DELETE /api/links/{id}`, 204 on success.
pub async fn delete_link_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    AuthorId(author_id): AuthorId,
) -> Result<StatusCode, AppError> {
    state.shortener.delete(id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attaches an ad to a link.
///
/// `PUT /api/links/{id}/ads`
///
/// # Errors
///
/// - 404 if the ad does not exist
/// - 409 if the ad is already attached
pub async fn add_ad_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    AuthorId(author_id): AuthorId,
    ApiJson(payload): ApiJson<AdRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.shortener.add_ad(id, payload.ad_id, author_id).await?;
    Ok(Json(link.into()))
}

/// Detaches an ad from a link.
///
/// `DELETE /api/links/{id}/ads`
pub async fn delete_ad_handler(
    ApiPath(id): ApiPath<i64>,
    State(state): State<AppState>,
    AuthorId(author_id): AuthorId,
    ApiJson(payload): ApiJson<AdRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .shortener
        .delete_ad(id, payload.ad_id, author_id)
        .await?;
    Ok(Json(link.into()))
}

/// Looks a link up by alias.
///
/// `GET /api/aliases/{alias}`
pub async fn get_by_alias_handler(
    ApiPath(alias): ApiPath<String>,
    State(state): State<AppState>,
    AuthorId(_): AuthorId,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.shortener.get_by_alias(&alias).await?;
    Ok(Json(link.into()))
}
