//! Cache-aside toggle resolver.

use crate::cache::{CacheKeys, CachePort};
use crate::metrics;
use crate::resolver::ToggleResolver;
use crate::write_back::WriteBack;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use traffic_cop_core::{ToggleValue, TrafficCopError, TrafficCopResult, UserId};
use traffic_cop_repository::StorePort;

/// Resolver reading the cache first and the store on a miss.
///
/// A store hit is written back to the cache through the [`WriteBack`]
/// worker; the caller never waits on it.
pub struct ToggleResolverImpl {
    cache: Arc<dyn CachePort>,
    store: Arc<dyn StorePort>,
    keys: CacheKeys,
    write_back: WriteBack,
}

impl ToggleResolverImpl {
    /// Creates a new resolver.
    pub fn new(
        cache: Arc<dyn CachePort>,
        store: Arc<dyn StorePort>,
        keys: CacheKeys,
        write_back: WriteBack,
    ) -> Self {
        Self {
            cache,
            store,
            keys,
            write_back,
        }
    }

    /// Handle to the write-back worker.
    #[must_use]
    pub fn write_back(&self) -> &WriteBack {
        &self.write_back
    }

    async fn lookup(&self, user_id: &UserId) -> TrafficCopResult<ToggleValue> {
        let key = self.keys.toggle(user_id);

        let cached = self.cache.get(&key).await.map_err(|e| match e {
            TrafficCopError::Cache(_) => e,
            other => TrafficCopError::Cache(other.to_string()),
        })?;

        if let Some(value) = cached {
            debug!(user_id = %user_id, source = "cache", "Toggle resolved");
            metrics::record_cache_hit();
            return Ok(ToggleValue::from(value));
        }
        metrics::record_cache_miss();

        let rows = self.store.query_by_user_id(user_id).await.map_err(|e| match e {
            TrafficCopError::Store(_) => e,
            other => TrafficCopError::Store(other.to_string()),
        })?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| TrafficCopError::not_found(user_id))?;
        let value = row.toggle();

        debug!(user_id = %user_id, source = "store", "Toggle resolved");
        metrics::record_store_fallback();

        self.write_back.enqueue(key, value.as_str().to_string());

        Ok(value)
    }
}

#[async_trait]
impl ToggleResolver for ToggleResolverImpl {
    async fn resolve(&self, user_id: &UserId) -> TrafficCopResult<ToggleValue> {
        let started = Instant::now();
        let result = self.lookup(user_id).await;
        metrics::record_resolve_duration(started.elapsed());

        if let Err(e) = &result {
            metrics::record_resolve_failure(e.kind());
            match e {
                TrafficCopError::NotFound { .. } => {
                    info!(user_id = %user_id, "No toggle for user");
                }
                _ => warn!(user_id = %user_id, error = %e, "Toggle resolution failed"),
            }
        }

        result
    }
}

impl std::fmt::Debug for ToggleResolverImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToggleResolverImpl")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
