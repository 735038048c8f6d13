//! Database connection pool management.

use sqlx::mysql::{MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::Connection;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use traffic_cop_config::StoreConfig;
use traffic_cop_core::{TrafficCopError, TrafficCopResult};

/// Database pool wrapper.
///
/// The pool is created lazily: no connection is opened until the first
/// query, so the service can start and report itself unhealthy while the
/// store is unreachable.
pub struct DatabasePool {
    pool: MySqlPool,
    connect_timeout: Duration,
}

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

impl DatabasePool {
    /// Creates a new lazily-connecting database pool from configuration.
    pub fn new(config: &StoreConfig) -> TrafficCopResult<Self> {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Configuring MySQL connection pool"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .connect_lazy(&config.url())
            .map_err(|e| {
                warn!("Invalid database configuration: {}", e);
                TrafficCopError::Configuration(format!("Invalid store URL: {}", e))
            })?;

        Ok(Self {
            pool,
            connect_timeout: config.connect_timeout(),
        })
    }

    /// Creates DatabasePool with a pre-existing pool.
    #[must_use]
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self {
            pool,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Checks that the store answers, making at most one connection attempt.
    ///
    /// An idle pooled connection is pinged when available. Otherwise one
    /// dedicated connection is opened and closed again. Pool acquisition
    /// retries refused connects until `acquire_timeout`, so it is not used here.
    pub async fn health_check(&self) -> TrafficCopResult<()> {
        if let Some(mut conn) = self.pool.try_acquire() {
            return conn
                .ping()
                .await
                .map_err(|e| TrafficCopError::Store(format!("Health check failed: {}", e)));
        }

        let options = self.pool.connect_options();
        let connect = MySqlConnection::connect_with(&options);
        let conn = tokio::time::timeout(self.connect_timeout, connect)
            .await
            .map_err(|_| {
                TrafficCopError::Store(format!(
                    "Health check timed out after {:?}",
                    self.connect_timeout
                ))
            })?
            .map_err(|e| TrafficCopError::Store(format!("Health check failed: {}", e)))?;

        if let Err(e) = conn.close().await {
            debug!("Closing health check connection failed: {}", e);
        }
        Ok(())
    }

    /// Runs database migrations.
    pub async fn run_migrations(&self) -> TrafficCopResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| TrafficCopError::Store(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Closes the database pool.
    pub async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Creates a shared database pool.
pub fn create_pool(config: &StoreConfig) -> TrafficCopResult<Arc<DatabasePool>> {
    let pool = DatabasePool::new(config)?;
    Ok(Arc::new(pool))
}
