pub mod check;
pub mod related;

use std::sync::Arc;

use anyhow::Context;
use pagelinks_core::DatabaseConfig;
use pagelinks_orm::{DatabaseBackend, DatabasePool, DatabasePoolConfig, PostgresBackend};

/// Open a pool sized from the database settings
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn DatabasePool>> {
    let pool_config = DatabasePoolConfig {
        max_connections: config.max_connections,
        min_connections: config.min_connections,
        acquire_timeout_seconds: config.acquire_timeout_seconds,
        ..DatabasePoolConfig::default()
    };

    let backend = PostgresBackend::new();
    let target = backend
        .parse_database_url(&config.url)
        .context("DATABASE_URL is not a usable PostgreSQL URL")?;
    tracing::info!(
        host = %target.host,
        port = target.port,
        database = %target.database,
        max_connections = pool_config.max_connections,
        "connecting to database"
    );

    backend
        .create_pool(&config.url, pool_config)
        .await
        .context("failed to connect to the database")
}
