//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes of the service.
///
/// # Endpoints
///
/// - `GET  /redirect/{alias}` - Redirect to the original URL
/// - `POST /receive`          - Create (or fetch) the alias for a URL
/// - `GET  /health`           - Database and cache liveness
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/redirect/{alias}", get(redirect_handler))
        .route("/receive", post(shorten_handler))
        .route("/health", get(health_handler))
}
