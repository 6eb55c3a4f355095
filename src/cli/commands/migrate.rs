use anyhow::Context;

use crate::config::AppConfig;
use crate::database::manager::redact;
use crate::database::DatabaseManager;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let db = DatabaseManager::connect(&config.database)
        .await
        .with_context(|| format!("connecting to {}", redact(&config.database.url)))?;
    db.migrate().await.context("applying migrations")?;
    db.close().await;
    println!("Migrations applied");
    Ok(())
}
