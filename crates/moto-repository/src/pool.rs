//! Database connection pool management.

use moto_config::DatabaseConfig;
use moto_core::{MotoError, MotoResult};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

/// Creates a PostgreSQL connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> MotoResult<PgPool> {
    info!("Connecting to PostgreSQL database...");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            MotoError::Database(format!("Failed to connect: {}", e))
        })?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Checks if the database connection is healthy.
pub async fn health_check(pool: &PgPool) -> MotoResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| MotoError::Database(format!("Health check failed: {}", e)))?;
    Ok(())
}

/// Runs database migrations.
pub async fn run_migrations(pool: &PgPool) -> MotoResult<()> {
    info!("Running database migrations...");
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| MotoError::Database(format!("Migration failed: {}", e)))?;
    info!("Database migrations completed");
    Ok(())
}
