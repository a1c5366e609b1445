//! Hangman server binary.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use hangman_server::{
    ChannelQueue, HangmanService, JobQueue, MemoryCache, ServerConfig, SqliteStore, StatsWorker,
    router, spawn_periodic_refresh,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hangman_server=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            db_path,
            stats_refresh_secs,
        } => {
            let config = ServerConfig::load_or_default(&config)?.with_overrides(
                host,
                port,
                db_path,
                stats_refresh_secs,
            );
            run_server(config).await
        }
        Command::Migrate { db_path } => run_migrations(db_path),
    }
}

/// Apply migrations without starting the server
#[instrument]
fn run_migrations(db_path: String) -> Result<()> {
    SqliteStore::new(db_path)?.run_migrations()?;
    info!("Migrations applied");
    Ok(())
}

/// Run the HTTP game server
#[instrument(skip(config))]
async fn run_server(config: ServerConfig) -> Result<()> {
    info!(db_path = %config.db_path(), "Opening datastore");
    let store = Arc::new(SqliteStore::new(config.db_path().clone())?);
    store.run_migrations()?;

    let cache = Arc::new(MemoryCache::new());
    let (queue, jobs) = ChannelQueue::channel();
    let queue: Arc<dyn JobQueue> = Arc::new(queue);

    let worker = StatsWorker::new(store.clone(), cache.clone(), jobs).spawn();
    let refresher = config
        .stats_refresh_interval()
        .map(|every| spawn_periodic_refresh(queue.clone(), every));

    let service = HangmanService::new(store, cache, queue);
    let app = router(service);

    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Hangman server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(refresher) = refresher {
        refresher.abort();
    }
    worker.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
