//! Database connection provider

use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::OnceCell;

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

/// Hands out the process-wide connection pool.
///
/// The pool is opened on the first call to [`ConnectionProvider::get_connection`] and shared
/// afterwards; concurrent first callers wait on the same initialization. Every call
/// re-validates the pool with a liveness probe.
pub struct ConnectionProvider {
    config: DatabaseConfig,
    pool: OnceCell<PgPool>,
}

impl ConnectionProvider {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    pub async fn get_connection(&self) -> AppResult<PgPool> {
        let pool = self
            .pool
            .get_or_try_init(|| async {
                tracing::info!(
                    "Opening database pool on {}:{}/{}",
                    self.config.host,
                    self.config.port,
                    self.config.dbname
                );
                PgPoolOptions::new()
                    .max_connections(self.config.max_connections)
                    .acquire_timeout(self.config.connect_timeout)
                    .connect_with(self.config.connect_options())
                    .await
                    .map_err(|e| AppError::storage("failed to connect to the database", e))
            })
            .await?;

        ping(pool).await?;
        Ok(pool.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }
}

/// Liveness probe
pub async fn ping(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::storage("database liveness probe failed", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn unreachable_database() -> DatabaseConfig {
        DatabaseConfig {
            username: "bookstore".to_string(),
            password: "bookstore".to_string(),
            host: "127.0.0.1".to_string(),
            // Nothing listens on the discard port
            port: 9,
            dbname: "bookstore".to_string(),
            max_connections: 1,
            connect_timeout: Duration::from_millis(500),
        }
    }

    #[tokio::test]
    async fn test_unreachable_database_is_reported() {
        let provider = ConnectionProvider::new(unreachable_database());

        let result = provider.get_connection().await;
        assert!(matches!(result, Err(AppError::Storage { .. })));
        // A failed first attempt leaves the provider uninitialized
        assert!(!provider.is_initialized());
    }
}
