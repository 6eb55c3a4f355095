use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::error::StoreError;

/// Owns the connection pool for the inventory database.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Connect eagerly, failing fast when the database is unreachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = Self::connect_options(config)?;
        let pool = Self::pool_options(config).connect_with(options).await?;
        info!("Connected to database {}", redact(&config.url));
        Ok(Self { pool })
    }

    /// Build a pool that opens connections on first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = Self::connect_options(config)?;
        let pool = Self::pool_options(config).connect_lazy_with(options);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, StoreError> {
        let options =
            PgConnectOptions::from_str(&config.url).map_err(|_| StoreError::InvalidDatabaseUrl)?;
        if config.statement_timeout_ms == 0 {
            return Ok(options);
        }
        Ok(options.options([("statement_timeout", config.statement_timeout_ms.to_string())]))
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

/// Strip credentials from a connection string before it reaches the logs.
pub fn redact(database_url: &str) -> String {
    match url::Url::parse(database_url) {
        Ok(mut url) => {
            let _ = url.set_password(None);
            let _ = url.set_username("");
            url.into()
        }
        Err(_) => "<unparseable database url>".to_string(),
    }
}
