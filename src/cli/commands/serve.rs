use anyhow::Context;
use tracing::info;

use crate::app::{app, AppState};
use crate::config::AppConfig;
use crate::database::manager::redact;
use crate::database::DatabaseManager;

pub async fn handle(mut config: AppConfig, port: Option<u16>, migrate: bool) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    info!("Starting Boxmeup API in {:?} mode", config.environment);

    let db = DatabaseManager::connect(&config.database)
        .await
        .with_context(|| format!("connecting to {}", redact(&config.database.url)))?;
    if migrate {
        db.migrate().await.context("applying migrations")?;
    }

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Boxmeup API listening on http://{}", bind_addr);

    let state = AppState::new(config, db.clone())?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
