//! Bookmarks API server.
//!
//! Loads settings, opens the database and serves the bookmarks routes until Ctrl-C.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bookmarks_api::app::App;
use bookmarks_api::http_handler;
use bookmarks_api::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use bookmarks_api::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = SettingsEngine::new(None);
    let settings = engine.load()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();

    if let Some(path) = engine.missing_config_file() {
        warn!(%path, "config file not found, using defaults");
    }
    info!(?settings, config = ?engine.get_config_path(), "settings loaded");

    let app = Arc::new(App::new(&settings)?);
    {
        let db = app.db()?;
        let count = BookmarkManager::new(db.connection()).count_bookmarks()?;
        info!(count, path = %settings.database_path, "database ready");
    }

    let bind_addr = settings.bind_address();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("bookmarks API listening on {}", listener.local_addr()?);

    http_handler::serve(listener, app, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
