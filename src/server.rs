//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, the access worker, and the Axum
//! server lifecycle including graceful shutdown.

use crate::application::services::ShortenerService;
use crate::config::Config;
use crate::domain::access_event::AccessTracker;
use crate::domain::access_worker::run_access_worker;
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::time::timeout;

/// Upper bound on flushing queued access events at shutdown.
const SHUTDOWN_FLUSH_TIMEOUT_SECS: u64 = 30;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Background access worker
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the server stops accepting connections, finishes
/// in-flight requests, flushes queued access increments, and closes the pool.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let repository = Arc::new(PgUrlRepository::new(pool.clone()));

    let (tracker, access_rx) = AccessTracker::channel(config.access_queue_capacity);
    let worker = tokio::spawn(run_access_worker(access_rx, repository.clone()));
    tracing::info!("Access worker started");

    let shortener = Arc::new(
        ShortenerService::new(repository, tracker)
            .with_max_code_attempts(config.max_code_attempts),
    );
    let state = AppState::new(shortener, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router, and with it every tracker, is gone: the worker drains and exits.
    match timeout(Duration::from_secs(SHUTDOWN_FLUSH_TIMEOUT_SECS), worker).await {
        Ok(Ok(())) => tracing::info!("Access events flushed"),
        Ok(Err(e)) => tracing::error!(error = %e, "Access worker panicked"),
        Err(_) => tracing::error!(
            "Access flush timed out after {} seconds",
            SHUTDOWN_FLUSH_TIMEOUT_SECS
        ),
    }

    pool.close().await;
    tracing::info!("Database pool closed");

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
