//! Store port definition.

use async_trait::async_trait;
use traffic_cop_core::{StoreRow, TrafficCopResult, UserId};

/// Read access to the durable user store.
///
/// Implementations own their connections; callers never open or close
/// anything through this trait.
#[async_trait]
pub trait StorePort: Send + Sync {
    /// Returns every row stored for the user, in store order.
    ///
    /// An empty vector means the user is unknown.
    async fn query_by_user_id(&self, user_id: &UserId) -> TrafficCopResult<Vec<StoreRow>>;

    /// Performs a single connect/no-op round trip.
    async fn ping(&self) -> TrafficCopResult<()>;
}
