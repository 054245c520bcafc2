//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::normalize_original_url;

/// Creates (or returns the existing) alias for a URL.
///
/// # Endpoint
///
/// `POST /receive`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "alias": "aB3dE5gH9k",
///   "short_url": "http://localhost:8081/redirect/aB3dE5gH9k"
/// }
/// ```
///
/// The URL is stored and matched in its normalized form, so equivalent
/// spellings of one URL share an alias.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 500 Internal Server Error if the store or cache fails, or no free
/// alias was found.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let original = normalize_original_url(&payload.url)
        .map_err(|e| AppError::bad_request("Invalid request", json!({ "url": e.to_string() })))?;

    let alias = state.shorten_service.shorten(&original).await?;
    let short_url = state.short_url(&alias);

    Ok(Json(ShortenResponse { alias, short_url }))
}
