//! Dependency health aggregation.

use crate::cache::CachePort;
use crate::health_service::HealthService;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use traffic_cop_core::HealthReport;
use traffic_cop_repository::StorePort;

/// Composes the cache liveness flag and one store probe.
pub struct HealthAggregator {
    cache: Arc<dyn CachePort>,
    store: Arc<dyn StorePort>,
    name: String,
    version: String,
}

impl HealthAggregator {
    /// Creates a new aggregator reporting the given service identity.
    pub fn new(
        cache: Arc<dyn CachePort>,
        store: Arc<dyn StorePort>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            store,
            name: name.into(),
            version: version.into(),
        }
    }
}

#[async_trait]
impl HealthService for HealthAggregator {
    async fn check(&self) -> HealthReport {
        let cache_connected = self.cache.is_connected();

        let store_connected = match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Store probe failed");
                false
            }
        };

        debug!(cache_connected, store_connected, "Health check completed");

        HealthReport {
            name: self.name.clone(),
            version: self.version.clone(),
            cache_connected,
            store_connected,
        }
    }
}

impl std::fmt::Debug for HealthAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthAggregator")
            .field("name", &self.name)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
