//! Cache port trait.

use async_trait::async_trait;
use traffic_cop_core::TrafficCopResult;

/// Key/value cache consulted before the store.
///
/// Values are raw strings. Implementations own their connections and
/// report reachability through [`CachePort::is_connected`] without a round
/// trip.
#[async_trait]
pub trait CachePort: Send + Sync {
    /// Reads a value. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> TrafficCopResult<Option<String>>;

    /// Writes a value.
    async fn set(&self, key: &str, value: &str) -> TrafficCopResult<()>;

    /// Last known reachability of the cache.
    fn is_connected(&self) -> bool;
}
