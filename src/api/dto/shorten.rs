//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::url_validator::validate_original_url;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (absolute HTTP/HTTPS with a host).
    #[validate(custom(function = "validate_original_url"))]
    pub url: String,
}

/// Alias assigned to the submitted URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub alias: String,
    pub short_url: String,
}
