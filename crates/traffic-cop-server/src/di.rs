//! Component wiring.
//!
//! Ports are constructed once here and injected into the resolver and the
//! health aggregator. Nothing below this module reads configuration or the
//! environment.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;
use traffic_cop_config::{AppConfig, CacheConfig};
use traffic_cop_core::{TrafficCopError, TrafficCopResult};
use traffic_cop_repository::{create_pool, DatabasePool, MySqlToggleStore, StorePort};
use traffic_cop_rest::AppState;
use traffic_cop_service::{
    CacheKeys, CachePort, HealthAggregator, HealthService, RedisCache, ToggleResolver,
    ToggleResolverImpl, WriteBack,
};

/// Fully wired application components.
pub struct AppModule {
    resolver: Arc<ToggleResolverImpl>,
    health: Arc<HealthAggregator>,
    write_back: WriteBack,
    worker: JoinHandle<()>,
    probe: Option<JoinHandle<()>>,
    pool: Option<Arc<DatabasePool>>,
}

impl AppModule {
    /// Wires Redis and MySQL adapters from configuration.
    ///
    /// Neither dependency is contacted here; both may be down at start-up.
    pub fn from_config(config: &AppConfig) -> TrafficCopResult<Self> {
        AppModuleBuilder::new(config)
            .with_redis(&config.cache)?
            .with_database_pool(create_pool(&config.store)?)
            .build()
    }

    /// Returns the toggle resolver.
    pub fn resolver(&self) -> Arc<dyn ToggleResolver> {
        self.resolver.clone()
    }

    /// Returns the health service.
    pub fn health(&self) -> Arc<dyn HealthService> {
        self.health.clone()
    }

    /// Returns the Axum state for the router.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.resolver(), self.health())
    }

    /// Returns the database pool, if the store is MySQL-backed.
    pub fn database_pool(&self) -> Option<&Arc<DatabasePool>> {
        self.pool.as_ref()
    }

    /// Drains pending cache writes and stops background tasks.
    pub async fn shutdown(self) {
        info!("Stopping background tasks...");
        self.write_back.shutdown().await;
        let _ = self.worker.await;

        if let Some(probe) = self.probe {
            probe.abort();
        }
        if let Some(pool) = self.pool {
            pool.close().await;
        }
        info!("Background tasks stopped");
    }
}

/// Builder for [`AppModule`].
pub struct AppModuleBuilder {
    cache: Option<Arc<dyn CachePort>>,
    store: Option<Arc<dyn StorePort>>,
    pool: Option<Arc<DatabasePool>>,
    probe: Option<JoinHandle<()>>,
    keys: CacheKeys,
    write_back_capacity: usize,
    name: String,
    version: String,
}

impl AppModuleBuilder {
    /// Creates a builder using the service identity and cache settings of
    /// `config`.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            cache: None,
            store: None,
            pool: None,
            probe: None,
            keys: CacheKeys::new(config.cache.key_prefix.clone()),
            write_back_capacity: config.cache.write_back_capacity,
            name: config.app.name.clone(),
            version: config.app.version.clone(),
        }
    }

    /// Uses the given cache port.
    pub fn with_cache(mut self, cache: Arc<dyn CachePort>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Uses the given store port.
    pub fn with_store(mut self, store: Arc<dyn StorePort>) -> Self {
        self.store = Some(store);
        self
    }

    /// Uses Redis as the cache and starts its liveness probe.
    pub fn with_redis(mut self, config: &CacheConfig) -> TrafficCopResult<Self> {
        let cache = RedisCache::from_config(config)?;
        self.probe = Some(cache.spawn_liveness_probe(config.liveness_interval()));
        Ok(self.with_cache(Arc::new(cache)))
    }

    /// Uses MySQL through `pool` as the store.
    pub fn with_database_pool(mut self, pool: Arc<DatabasePool>) -> Self {
        self.pool = Some(pool.clone());
        self.with_store(Arc::new(MySqlToggleStore::new(pool)))
    }

    /// Builds the module and starts the write-back worker.
    pub fn build(self) -> TrafficCopResult<AppModule> {
        let cache = self
            .cache
            .ok_or_else(|| TrafficCopError::Configuration("No cache configured".to_string()))?;
        let store = self
            .store
            .ok_or_else(|| TrafficCopError::Configuration("No store configured".to_string()))?;

        let (write_back, worker) = WriteBack::spawn(cache.clone(), self.write_back_capacity);

        let resolver = Arc::new(ToggleResolverImpl::new(
            cache.clone(),
            store.clone(),
            self.keys,
            write_back.clone(),
        ));
        let health = Arc::new(HealthAggregator::new(cache, store, self.name, self.version));

        Ok(AppModule {
            resolver,
            health,
            write_back,
            worker,
            probe: self.probe,
            pool: self.pool,
        })
    }
}
