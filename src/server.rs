//! HTTP server initialization and runtime setup.
//!
//! Handles backend connections, liveness monitors, and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::liveness::spawn_liveness_monitor;
use crate::application::services::{RedirectService, ShortenService};
use crate::config::Config;
use crate::domain::repositories::{HealthProbe, LinkCache, LinkStore};
use crate::infrastructure::cache::{MemoryLinkCache, RedisLinkCache};
use crate::infrastructure::persistence::PgLinkStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio::task::JoinHandle;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and `url` table
/// - Redis cache (or in-memory fallback)
/// - Liveness monitors for both backends
/// - Axum HTTP server
///
/// On Ctrl-C or SIGTERM the server stops accepting connections and drains
/// in-flight requests; then the monitors are aborted and both backends are
/// closed.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or schema bootstrap fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = Arc::new(
        PgLinkStore::connect(&config)
            .await
            .context("Failed to connect to database")?,
    );

    let (cache, cache_probe) = build_cache(&config).await;
    let store_probe: Arc<dyn HealthProbe> = store.clone();

    let monitors = [
        spawn_liveness_monitor(store_probe.clone(), config.liveness_interval()),
        spawn_liveness_monitor(cache_probe.clone(), config.liveness_interval()),
    ];
    tracing::info!("Liveness monitors started");

    let link_store: Arc<dyn LinkStore> = store;
    let state = AppState {
        redirect_service: Arc::new(RedirectService::new(
            cache.clone(),
            link_store.clone(),
            config.request_timeout(),
        )),
        shorten_service: Arc::new(ShortenService::new(
            cache.clone(),
            link_store.clone(),
            config.shorten_policy(),
        )),
        store_probe,
        cache_probe,
        base_url: config.base_url.clone(),
        probe_timeout: config.liveness_interval(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    shutdown(monitors, cache, link_store).await;
    Ok(())
}

/// Connects the Redis cache, falling back to the in-memory cache when Redis
/// is not configured or unreachable.
async fn build_cache(config: &Config) -> (Arc<dyn LinkCache>, Arc<dyn HealthProbe>) {
    if let Some(redis_url) = &config.redis_url {
        match RedisLinkCache::connect(redis_url, config.cache_ttl_seconds, config.redis_max_retries)
            .await
        {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                let redis = Arc::new(redis);
                return (redis.clone(), redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
            }
        }
    } else {
        tracing::info!("Redis not configured, using in-memory cache");
    }

    let memory = Arc::new(MemoryLinkCache::with_capacity(
        config.memory_cache_capacity,
        config.cache_ttl(),
    ));
    (memory.clone(), memory)
}

/// Waits for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        _ = terminate => tracing::info!("Received SIGTERM, initiating shutdown..."),
    }
}

/// Stops the monitors and closes both backends once.
async fn shutdown(
    monitors: [JoinHandle<()>; 2],
    cache: Arc<dyn LinkCache>,
    store: Arc<dyn LinkStore>,
) {
    for monitor in monitors {
        monitor.abort();
    }

    if let Err(e) = cache.close().await {
        tracing::warn!("Failed to close cache: {}", e);
    }
    if let Err(e) = store.close().await {
        tracing::warn!("Failed to close database: {}", e);
    }

    tracing::info!("Server shutdown complete");
}
