//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tokio::time::Instant;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::repositories::HealthProbe;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Both backends answered a ping
/// - **503 Service Unavailable**: One or more backends degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok" },
///     "cache": { "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let deadline = Instant::now() + state.probe_timeout;

    let (database, cache) = tokio::join!(
        check(state.store_probe.as_ref(), deadline),
        check(state.cache_probe.as_ref(), deadline),
    );

    let all_healthy = database.is_ok() && cache.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, cache },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check(probe: &dyn HealthProbe, deadline: Instant) -> CheckStatus {
    match probe.ping(deadline).await {
        Ok(()) => CheckStatus::ok(),
        Err(e) => CheckStatus::error(format!("{} error: {}", probe.name(), e)),
    }
}
