//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, migrations, entry kind registration and the Axum
//! server lifecycle.

use crate::application::services::EntryService;
use crate::config::Config;
use crate::domain::kinds::EntryTypeRegistry;
use crate::domain::repositories::EntryRepository;
use crate::infrastructure::persistence::{MemoryEntryRepository, PgEntryRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::url_resolver::UrlResolver;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or in-memory storage)
/// - Entry kind registry with the built-in kinds
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = connect_repository(&config).await?;

    let registry = EntryTypeRegistry::with_builtin_kinds();
    tracing::info!(kinds = ?registry.type_names(), "Entry kinds registered");

    let entry_service = Arc::new(EntryService::new(
        repository,
        Arc::new(registry),
        Arc::new(UrlResolver::default()),
    ));

    let state = AppState::new(entry_service, config.page_size);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the entry repository selected by the configuration.
async fn connect_repository(config: &Config) -> Result<Arc<dyn EntryRepository>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("No database configured, entries are kept in memory");
        return Ok(Arc::new(MemoryEntryRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    Ok(Arc::new(PgEntryRepository::new(Arc::new(pool))))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
