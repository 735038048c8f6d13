//! Toggle resolver trait definition.

use async_trait::async_trait;
use traffic_cop_core::{ToggleValue, TrafficCopResult, UserId};

/// Resolves the routing toggle for a user.
#[async_trait]
pub trait ToggleResolver: Send + Sync {
    /// Returns the toggle from the cache, falling back to the store.
    ///
    /// # Errors
    ///
    /// - `Cache` if the cache read fails; the store is not consulted.
    /// - `Store` if the store query fails.
    /// - `NotFound` if the store has no row for the user.
    async fn resolve(&self, user_id: &UserId) -> TrafficCopResult<ToggleValue>;
}
