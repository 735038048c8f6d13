//! Application state for Axum handlers.

use std::sync::Arc;
use traffic_cop_service::{HealthService, ToggleResolver};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn ToggleResolver>,
    pub health: Arc<dyn HealthService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(resolver: Arc<dyn ToggleResolver>, health: Arc<dyn HealthService>) -> Self {
        Self { resolver, health }
    }
}
