//! MySQL-backed store port.

use crate::{traits::StorePort, DatabasePool};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use traffic_cop_core::{StoreRow, TrafficCopError, TrafficCopResult, UserId};

const SELECT_PLATFORM: &str = "SELECT platform FROM users WHERE user_id = ?";

/// Store port reading the `users` table.
#[derive(Clone)]
pub struct MySqlToggleStore {
    pool: Arc<DatabasePool>,
}

impl MySqlToggleStore {
    /// Creates a new MySQL toggle store.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorePort for MySqlToggleStore {
    async fn query_by_user_id(&self, user_id: &UserId) -> TrafficCopResult<Vec<StoreRow>> {
        debug!(user_id = %user_id, "Querying store for platform");

        let rows = sqlx::query_as::<_, StoreRow>(SELECT_PLATFORM)
            .bind(user_id.as_str())
            .fetch_all(self.pool.inner())
            .await
            .map_err(|e| TrafficCopError::Store(e.to_string()))?;

        debug!(user_id = %user_id, rows = rows.len(), "Store query completed");
        Ok(rows)
    }

    async fn ping(&self) -> TrafficCopResult<()> {
        self.pool.health_check().await
    }
}

impl std::fmt::Debug for MySqlToggleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlToggleStore")
            .field("pool", &self.pool)
            .finish()
    }
}
