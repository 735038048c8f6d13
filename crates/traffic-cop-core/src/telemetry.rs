//! Tracing initialisation.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a `fmt`
//! layer in either human-readable or JSON form. `RUST_LOG` always wins over
//! the configured default level.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::TrafficCopResult;
use serde::{Deserialize, Serialize};

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Lower the default filter to `debug`.
    #[serde(default)]
    pub debug: bool,

    /// Emit JSON lines instead of the pretty format.
    #[serde(default)]
    pub json: bool,
}

fn default_service_name() -> String {
    "traffic-cop".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            debug: false,
            json: false,
        }
    }
}

impl TelemetryConfig {
    /// Returns the filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug,hyper=info,sqlx=info,tower_http=debug"
        } else {
            "info,tower_http=info"
        }
    }
}

/// Initialize tracing with the given configuration.
#[cfg(feature = "telemetry")]
pub fn init_telemetry(config: &TelemetryConfig) -> TrafficCopResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| {
        crate::TrafficCopError::Internal(format!("Failed to initialize tracing: {}", e))
    })?;

    tracing::info!(
        service_name = %config.service_name,
        debug = config.debug,
        json = config.json,
        "Telemetry initialized"
    );

    Ok(())
}

/// Placeholder for when telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_telemetry(_config: &TelemetryConfig) -> TrafficCopResult<()> {
    Ok(())
}
