//! Database connection pool for reporting-service.

use crate::config::DatabaseConfig;
use service_core::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(config), fields(service = "reporting-service"))]
    pub async fn new(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            ssl_mode = %config.ssl_mode,
            "Connecting to PostgreSQL"
        );

        let options = connect_options(config)?;
        let pool = pool_options(config)
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Create the pool without opening a connection; the first query connects.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = connect_options(config)?;
        Ok(Self {
            pool: pool_options(config).connect_lazy_with(options),
        })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(600))
}

/// Parse the URL and apply the configured SSL mode, which overrides any
/// `sslmode` in the URL.
fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, AppError> {
    let ssl_mode = PgSslMode::from_str(&config.ssl_mode).map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Invalid DATABASE_SSL_MODE '{}': {}",
            config.ssl_mode,
            e
        ))
    })?;

    let options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid database URL: {}", e)))?;

    Ok(options.ssl_mode(ssl_mode))
}
