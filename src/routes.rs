//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /redirect/{alias}` - Short link redirect
//! - `POST /receive`          - Shorten a URL
//! - `GET  /health`           - Database and cache liveness
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes with state and tracing applied, without path normalization.
///
/// Integration tests drive this directly through `axum-test`.
pub fn router(state: AppState) -> Router {
    api::routes::public_routes()
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
