//! Health report types.

use serde::{Deserialize, Serialize};

/// Connection state of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum DependencyState {
    #[serde(rename = "Connected")]
    Connected,
    #[serde(rename = "Not Connected")]
    NotConnected,
}

impl DependencyState {
    /// Returns true if the dependency is reachable.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl From<bool> for DependencyState {
    fn from(connected: bool) -> Self {
        if connected {
            Self::Connected
        } else {
            Self::NotConnected
        }
    }
}

/// Composite health of the service, derived fresh on every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// Service name.
    pub name: String,
    /// Service version.
    pub version: String,
    /// Liveness flag reported by the cache.
    pub cache_connected: bool,
    /// Outcome of the store probe.
    pub store_connected: bool,
}

impl HealthReport {
    /// Returns true only if both dependencies are connected.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.cache_connected && self.store_connected
    }

    /// Returns the cache state.
    #[must_use]
    pub fn cache_state(&self) -> DependencyState {
        self.cache_connected.into()
    }

    /// Returns the store state.
    #[must_use]
    pub fn store_state(&self) -> DependencyState {
        self.store_connected.into()
    }
}
