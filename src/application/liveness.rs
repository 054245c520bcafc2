//! Background liveness monitors for the cache and the store.
//!
//! Each monitor pings its dependency once per interval and logs a warning on
//! failure. Monitors never exit on their own, never touch request-serving
//! state, and are aborted through their [`JoinHandle`] at shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::domain::repositories::HealthProbe;

/// Spawns a monitor task for `probe`.
///
/// # Example
///
/// ```ignore
/// let handle = spawn_liveness_monitor(store_probe, Duration::from_secs(2));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_liveness_monitor(probe: Arc<dyn HealthProbe>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(run_liveness_monitor(probe, interval))
}

/// Pings `probe` forever: deadline of one interval, then a full-interval sleep.
pub async fn run_liveness_monitor(probe: Arc<dyn HealthProbe>, interval: Duration) {
    info!(
        "Starting {} liveness monitor with interval of {}ms",
        probe.name(),
        interval.as_millis()
    );

    loop {
        let deadline = Instant::now() + interval;

        match probe.ping(deadline).await {
            Ok(()) => debug!("{} ping ok", probe.name()),
            Err(e) => warn!(
                "{} ping failed within {}ms: {}",
                probe.name(),
                interval.as_millis(),
                e
            ),
        }

        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockHealthProbe;
    use crate::domain::store_error::StoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_probe(result: Result<(), StoreError>) -> (Arc<dyn HealthProbe>, Arc<AtomicUsize>) {
        let pings = Arc::new(AtomicUsize::new(0));
        let pings_clone = pings.clone();

        let mut probe = MockHealthProbe::new();
        probe.expect_name().return_const("database");
        probe.expect_ping().returning(move |_| {
            pings_clone.fetch_add(1, Ordering::SeqCst);
            result.clone()
        });

        (Arc::new(probe), pings)
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_pings_once_per_interval() {
        let (probe, pings) = counting_probe(Ok(()));

        let handle = spawn_liveness_monitor(probe, Duration::from_secs(2));

        // Pings at t=0s, 2s and 4s.
        sleep(Duration::from_secs(5)).await;
        assert_eq!(pings.load(Ordering::SeqCst), 3);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_survives_failures() {
        let (probe, pings) = counting_probe(Err(StoreError::ConnectionClosed));

        let handle = spawn_liveness_monitor(probe, Duration::from_secs(2));

        sleep(Duration::from_secs(9)).await;
        assert_eq!(pings.load(Ordering::SeqCst), 5);
        assert!(!handle.is_finished());

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ping_deadline_is_one_interval() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let mut probe = MockHealthProbe::new();
        probe.expect_name().return_const("cache");
        probe.expect_ping().returning(move |deadline| {
            let _ = tx.send(deadline);
            Ok(())
        });

        let start = Instant::now();
        let handle = spawn_liveness_monitor(Arc::new(probe), Duration::from_secs(2));

        let deadline = rx.recv().await.unwrap();
        assert_eq!(deadline, start + Duration::from_secs(2));

        handle.abort();
    }

    #[tokio::test]
    async fn test_monitor_can_be_aborted() {
        let (probe, _) = counting_probe(Ok(()));

        let handle = spawn_liveness_monitor(probe, Duration::from_millis(10));
        handle.abort();

        let result = handle.await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
