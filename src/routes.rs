//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /link/{alias}` - Redirect resolution (public)
//! - `GET  /health`       - Health check (public)
//! - `/api/*`             - Link management (`X-Author-Id` required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline, 408 on expiry
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// Requests running longer than `request_timeout` are aborted; dropping the
/// handler future cancels any in-flight storage or alias work.
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/link/{alias}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(timeout_layer(request_timeout))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn timeout_layer(request_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout)
}
