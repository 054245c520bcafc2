//! Validation of original URLs submitted for shortening.
//!
//! Accepted URLs are stored in their parsed (WHATWG-serialized) form. The
//! parser drops embedded tabs and newlines and trims surrounding whitespace,
//! so the serialized form is what redirects can carry in a `Location` header
//! and what the idempotent lookup in
//! [`crate::application::services::ShortenService`] matches on.

use std::borrow::Cow;
use url::Url;
use validator::ValidationError;

/// Reasons an original URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Parses `input` and returns its canonical serialization.
///
/// Equivalent spellings of one URL (surrounding spaces, embedded line breaks,
/// upper-case scheme or host, a missing root path) normalize to one string.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`UrlValidationError::MissingHost`] when no host is present.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_original_url(" HTTPS://Example.com").unwrap(),
///     "https://example.com/"
/// );
/// ```
pub fn normalize_original_url(input: &str) -> Result<String, UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url.into()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// Rejects potentially dangerous schemes like `javascript:`, `data:` or `file:`.
///
/// # Errors
///
/// See [`normalize_original_url`].
pub fn check_original_url(input: &str) -> Result<(), UrlValidationError> {
    normalize_original_url(input).map(|_| ())
}

/// `validator` adapter for [`check_original_url`].
pub fn validate_original_url(input: &str) -> Result<(), ValidationError> {
    check_original_url(input).map_err(|e| {
        ValidationError::new("original_url").with_message(Cow::Owned(e.to_string()))
    })
}
