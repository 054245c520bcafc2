//! Liveness probe contract shared by cache and store adapters.

use crate::domain::store_error::StoreResult;
use async_trait::async_trait;
use tokio::time::Instant;

/// A dependency that can be pinged without mutating state.
///
/// Consumed by the background monitors in [`crate::application::liveness`]
/// and by the `/health` endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Short label used in logs and health responses (e.g. `"cache"`).
    fn name(&self) -> &'static str;

    /// Round-trips to the backend before `deadline`.
    async fn ping(&self, deadline: Instant) -> StoreResult<()>;
}
