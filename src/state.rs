//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{RedirectService, ShortenService};
use crate::domain::repositories::HealthProbe;

/// Services and probes shared across requests.
///
/// Cloning is cheap: every field is either an `Arc` or a small value.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub shorten_service: Arc<ShortenService>,
    pub store_probe: Arc<dyn HealthProbe>,
    pub cache_probe: Arc<dyn HealthProbe>,
    /// Prefix of returned short URLs, e.g. `http://localhost:8081`.
    pub base_url: String,
    /// Deadline for each dependency ping made by `GET /health`.
    pub probe_timeout: Duration,
}

impl AppState {
    /// Builds the full short URL for `alias`.
    pub fn short_url(&self, alias: &str) -> String {
        format!("{}/redirect/{}", self.base_url.trim_end_matches('/'), alias)
    }
}
