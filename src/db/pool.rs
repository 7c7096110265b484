//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL
//! connections. Migrations are embedded and applied over a synchronous
//! connection before the pool is handed out.

use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::config::settings::DatabaseConfig;
use crate::error::AppError;

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap. Structures holding
/// AsyncDbPool can derive Clone without additional Arc wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Embedded schema migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates an async database connection pool from configuration.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let database_url = config.resolve_url().map_err(|e| AppError::Configuration {
        key: "database.url".to_string(),
        source: anyhow::Error::from(e),
    })?;

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

    Ok(pool)
}

/// Applies all pending embedded migrations over a synchronous connection.
pub fn run_pending_migrations(config: &DatabaseConfig) -> Result<usize, AppError> {
    let database_url = config.resolve_url().map_err(|e| AppError::Configuration {
        key: "database.url".to_string(),
        source: anyhow::Error::from(e),
    })?;

    let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
        operation: "connect for migrations".to_string(),
        source: anyhow::Error::from(e),
    })?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| AppError::Database {
            operation: "run migrations".to_string(),
            source: anyhow::anyhow!(e.to_string()),
        })?;

    for version in &applied {
        tracing::info!(migration = %version, "Applied migration");
    }

    Ok(applied.len())
}
