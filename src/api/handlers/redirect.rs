//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /redirect/{alias}`
///
/// Resolution goes through [`crate::application::services::RedirectService`]:
/// cache first, then the store, repopulating the cache on a miss.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
/// Returns 500 Internal Server Error if the store is unreachable, or if the
/// stored URL cannot be carried in a `Location` header.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original = state.redirect_service.resolve(&alias).await?;

    let location = HeaderValue::try_from(original.as_str()).map_err(|_| {
        error!("Stored URL for {} is not a valid Location header", alias);
        AppError::internal("Internal server error", json!({}))
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]))
}
