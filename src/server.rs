//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, and Axum server lifecycle.

use crate::application::services::QueryCache;
use crate::config::{CacheBackend, Config};
use crate::infrastructure::cache::{CacheStore, InMemoryCache, RedisCache, TracingFaultReporter};
use crate::infrastructure::persistence::{PgDatabaseHealth, PgLogRepository, PgThreatRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Cache backend and its reconnect supervisor (or store-only mode)
/// - Axum HTTP server with graceful shutdown
///
/// A cache that is down at startup does not prevent the server from
/// starting; the supervisor keeps trying in the background.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    let cache = Arc::new(open_cache(&config)?);

    let pool_arc = Arc::new(pool.clone());
    let state = AppState::new(
        Arc::new(PgThreatRepository::new(pool_arc.clone())),
        Arc::new(PgLogRepository::new(pool_arc.clone())),
        Arc::new(PgDatabaseHealth::new(pool_arc)),
        cache.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache.close();
    pool.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds the [`QueryCache`] for the configured backend.
///
/// - `memory`: in-process cache, connected by the supervisor on first tick
/// - `redis` with a URL: Redis, connected in the background
/// - `redis` without a URL: store-only mode
fn open_cache(config: &Config) -> Result<QueryCache> {
    let store: Arc<dyn CacheStore> = match (config.cache_backend, &config.redis_url) {
        (CacheBackend::Memory, _) => {
            tracing::info!("Cache enabled (in-memory)");
            Arc::new(InMemoryCache::default())
        }
        (CacheBackend::Redis, Some(redis_url)) => {
            tracing::info!("Cache enabled (Redis), connecting in background");
            Arc::new(RedisCache::new(redis_url).context("Invalid Redis URL")?)
        }
        (CacheBackend::Redis, None) => {
            tracing::info!("Cache disabled, serving from database only");
            return Ok(QueryCache::disabled());
        }
    };

    Ok(QueryCache::open(
        store,
        config.reconnect_policy(),
        Arc::new(TracingFaultReporter),
        config.cache_op_timeout(),
    ))
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
