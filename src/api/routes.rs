//! API route configuration.
//!
//! Every route here requires the `X-Author-Id` header, enforced by the
//! [`crate::api::middleware::AuthorId`] extractor in each handler.

use crate::api::handlers::{
    add_ad_handler, create_link_handler, delete_ad_handler, delete_link_handler,
    get_by_alias_handler, get_link_handler, list_links_handler, update_alias_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

/// Link management routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /links`             - List the caller's links
/// - `POST   /links`             - Create a link
/// - `GET    /links/{id}`        - Get one of the caller's links
/// - `PUT    /links/{id}`        - Change or regenerate the alias
/// - `DELETE /links/{id}`        - Delete a link
/// - `PUT    /links/{id}/ads`    - Attach an ad
/// - `DELETE /links/{id}/ads`    - Detach an ad
/// - `GET    /aliases/{alias}`   - Look a link up by alias
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_alias_handler)
                .delete(delete_link_handler),
        )
        .route(
            "/links/{id}/ads",
            put(add_ad_handler).delete(delete_ad_handler),
        )
        .route("/aliases/{alias}", get(get_by_alias_handler))
}
