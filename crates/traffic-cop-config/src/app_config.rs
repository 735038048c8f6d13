//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use traffic_cop_core::telemetry::TelemetryConfig;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Cache (Redis) configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Store (SQL) configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name, reported by the health check.
    pub name: String,
    /// Application version, reported by the health check.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "traffic-cop".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "production".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port. Zero means "not configured".
    pub port: u16,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 0,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Returns the server address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Redis cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Redis host. Empty means "not configured".
    pub host: String,
    /// Redis port. Zero means "not configured".
    pub port: u16,
    /// Connection pool size.
    pub pool_size: usize,
    /// Timeout for creating or waiting on a pooled connection, in seconds.
    pub connect_timeout_secs: u64,
    /// Optional namespace prepended to every key.
    pub key_prefix: Option<String>,
    /// Optional expiry for written entries. `None` keeps entries forever.
    pub entry_ttl_secs: Option<u64>,
    /// How often the background probe pings Redis.
    pub liveness_interval_secs: u64,
    /// Capacity of the write-back queue.
    pub write_back_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 0,
            pool_size: 16,
            connect_timeout_secs: 2,
            key_prefix: None,
            entry_ttl_secs: None,
            liveness_interval_secs: 5,
            write_back_capacity: 1024,
        }
    }
}

impl CacheConfig {
    /// Returns the Redis URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }

    /// Returns the entry TTL as a Duration, if any.
    #[must_use]
    pub fn entry_ttl(&self) -> Option<Duration> {
        self.entry_ttl_secs.map(Duration::from_secs)
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the liveness probe interval as a Duration.
    #[must_use]
    pub const fn liveness_interval(&self) -> Duration {
        Duration::from_secs(self.liveness_interval_secs)
    }
}

/// SQL store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database host. Empty means "not configured".
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database (keyspace) name.
    pub database: String,
    /// Database user.
    pub username: String,
    /// Database password.
    pub password: String,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Apply the embedded schema migration at start-up.
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 3306,
            database: "ks1".to_string(),
            username: "traffic_cop".to_string(),
            password: "traffic_cop".to_string(),
            max_connections: 10,
            connect_timeout_secs: 5,
            run_migrations: false,
        }
    }
}

impl StoreConfig {
    /// Returns the database URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Debug logging.
    pub debug: bool,
    /// Log format (json, pretty).
    pub log_format: String,
    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,
    /// Metrics endpoint path.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_format: "pretty".to_string(),
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Builds the telemetry settings for the given service name.
    #[must_use]
    pub fn telemetry(&self, service_name: &str) -> TelemetryConfig {
        TelemetryConfig {
            service_name: service_name.to_string(),
            debug: self.debug,
            json: self.log_format == "json",
        }
    }
}
