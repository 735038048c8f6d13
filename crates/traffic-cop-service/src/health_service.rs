//! Health service trait definition.

use async_trait::async_trait;
use traffic_cop_core::HealthReport;

/// Reports the reachability of the service's dependencies.
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Builds a fresh report. Never fails; an unreachable dependency is
    /// reported as disconnected.
    async fn check(&self) -> HealthReport;
}
