use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Environment variable {0} must not be empty")]
    Empty(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Deployment configuration. Built once at startup and handed to whatever needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing)]
    pub url: String,
    pub max_connections: u32,
    /// Pool acquire timeout in seconds.
    pub connection_timeout: u64,
    /// Server side statement timeout in milliseconds; 0 disables it.
    pub statement_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub page_size: i64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    #[serde(skip_serializing)]
    pub legacy_salt: String,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
}

impl SecurityConfig {
    /// Lifetime of issued credentials. Zero, or more hours than a `Duration`
    /// can hold, is rejected.
    pub fn token_lifetime(&self) -> Result<Duration, ConfigError> {
        let invalid = || {
            ConfigError::Invalid(
                "SECURITY_JWT_EXPIRY_HOURS",
                self.jwt_expiry_hours.to_string(),
            )
        };
        if self.jwt_expiry_hours == 0 {
            return Err(invalid());
        }
        i64::try_from(self.jwt_expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(invalid)
    }
}

/// Listing page size when nothing overrides it.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let legacy_salt = env::var("LEGACY_SALT").map_err(|_| ConfigError::Missing("LEGACY_SALT"))?;

        let mut config = Self::profile(environment, database_url, jwt_secret, legacy_salt);
        config.apply_env_overrides();
        config.security.token_lifetime()?;
        Ok(config)
    }

    /// Profile defaults for an environment with the given secrets.
    pub fn profile(
        environment: Environment,
        database_url: String,
        jwt_secret: String,
        legacy_salt: String,
    ) -> Self {
        let (max_connections, connection_timeout, statement_timeout_ms, enable_cors, request_logging) =
            match environment {
                Environment::Development => (10, 30, 30_000, true, true),
                Environment::Staging => (20, 10, 10_000, true, true),
                Environment::Production => (50, 5, 5_000, false, false),
            };

        Self {
            environment,
            port: 8080,
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                connection_timeout,
                statement_timeout_ms,
            },
            api: ApiConfig {
                page_size: DEFAULT_PAGE_SIZE,
                enable_request_logging: request_logging,
            },
            security: SecurityConfig {
                jwt_secret,
                legacy_salt,
                jwt_expiry_hours: 24 * 5,
                enable_cors,
            },
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(port) = env::var("BOXMEUP_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse().ok())
        {
            self.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_STATEMENT_TIMEOUT_MS") {
            self.database.statement_timeout_ms = v.parse().unwrap_or(self.database.statement_timeout_ms);
        }

        // API overrides
        if let Ok(v) = env::var("API_PAGE_SIZE") {
            self.api.page_size = v.parse().unwrap_or(self.api.page_size);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        self.api.page_size = self.api.page_size.max(1);
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    let value = env::var(name).map_err(|_| ConfigError::Missing(name))?;
    if value.trim().is_empty() {
        return Err(ConfigError::Empty(name));
    }
    Ok(value)
}
