//! Redis-based cache implementation.

use super::CachePort;
use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use redis::{AsyncCommands, RedisError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use traffic_cop_config::CacheConfig;
use traffic_cop_core::{TrafficCopError, TrafficCopResult};

/// Creates a Redis connection pool.
///
/// No connection is opened here; an unreachable Redis shows up later as
/// command failures and a cleared liveness flag.
pub fn create_pool(config: &CacheConfig) -> TrafficCopResult<Pool> {
    info!(url = %config.url(), "Creating Redis connection pool");

    Config::from_url(config.url())
        .builder()
        .map_err(|e| TrafficCopError::Configuration(format!("Invalid Redis config: {}", e)))?
        .max_size(config.pool_size)
        .create_timeout(Some(config.connect_timeout()))
        .wait_timeout(Some(config.connect_timeout()))
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| TrafficCopError::Configuration(format!("Failed to create pool: {}", e)))
}

/// Whether `err` means Redis itself is unreachable, as opposed to a bad reply
/// for one key.
fn is_connection_error(err: &RedisError) -> bool {
    err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
}

/// Redis-backed cache port.
///
/// Every command outcome updates a shared liveness flag, and
/// [`RedisCache::spawn_liveness_probe`] keeps it fresh while the cache is idle.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
    entry_ttl: Option<Duration>,
    connected: Arc<AtomicBool>,
}

impl RedisCache {
    /// Creates a cache over an existing pool.
    #[must_use]
    pub fn new(pool: Pool, entry_ttl: Option<Duration>) -> Self {
        Self {
            pool,
            entry_ttl,
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates the pool and the cache from configuration.
    pub fn from_config(config: &CacheConfig) -> TrafficCopResult<Self> {
        Ok(Self::new(create_pool(config)?, config.entry_ttl()))
    }

    async fn get_conn(&self) -> TrafficCopResult<deadpool_redis::Connection> {
        self.pool.get().await.map_err(|e| {
            self.mark(false);
            TrafficCopError::Cache(format!("Failed to get Redis connection: {}", e))
        })
    }

    fn command_failed(&self, err: &RedisError) {
        if is_connection_error(err) {
            self.mark(false);
        }
    }

    fn mark(&self, connected: bool) {
        let previous = self.connected.swap(connected, Ordering::Relaxed);
        if previous != connected {
            if connected {
                info!("Redis connection established");
            } else {
                warn!("Redis connection lost");
            }
        }
    }

    /// Sends one `PING` and records the outcome.
    pub async fn probe(&self) -> bool {
        let alive = match self.pool.get().await {
            Ok(mut conn) => redis::cmd("PING")
                .query_async::<String>(&mut *conn)
                .await
                .is_ok(),
            Err(_) => false,
        };
        self.mark(alive);
        alive
    }

    /// Spawns a task that probes Redis every `interval`.
    ///
    /// The first probe runs immediately. Abort the handle to stop it.
    pub fn spawn_liveness_probe(&self, interval: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                cache.probe().await;
            }
        })
    }
}

#[async_trait]
impl CachePort for RedisCache {
    async fn get(&self, key: &str) -> TrafficCopResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            self.command_failed(&e);
            TrafficCopError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;
        self.mark(true);

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> TrafficCopResult<()> {
        let mut conn = self.get_conn().await?;

        let result = match self.entry_ttl {
            Some(ttl) => {
                conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                    .await
            }
            None => conn.set::<_, _, ()>(key, value).await,
        };

        result.map_err(|e| {
            self.command_failed(&e);
            TrafficCopError::Cache(format!("Failed to set key '{}': {}", key, e))
        })?;
        self.mark(true);

        debug!("Cached key '{}'", key);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("entry_ttl", &self.entry_ttl)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}
