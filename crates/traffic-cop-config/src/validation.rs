//! Configuration validation.
//!
//! Every problem is collected before reporting, so a misconfigured
//! deployment learns about all missing settings in one start-up attempt.

use crate::AppConfig;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// A required setting was not provided.
    Missing { name: &'static str },
    /// Pool size must be at least one.
    EmptyPool { name: &'static str },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: &'static str },
    /// Write-back queue must hold at least one entry.
    EmptyWriteBackQueue,
    /// Log format is not one of the supported values.
    InvalidLogFormat { value: String },
    /// Metrics path must be absolute.
    InvalidMetricsPath { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => write!(f, "{} is missing!", name),
            Self::EmptyPool { name } => write!(f, "{} pool size must be at least 1", name),
            Self::NonPositiveTimeout { name } => {
                write!(f, "Timeout '{}' must be positive", name)
            }
            Self::EmptyWriteBackQueue => {
                write!(f, "Cache write-back capacity must be at least 1")
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: pretty, json)", value)
            }
            Self::InvalidMetricsPath { value } => {
                write!(f, "Metrics path must start with '/': '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log formats.
    const VALID_LOG_FORMATS: &'static [&'static str] = &["pretty", "json"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_cache(&config.cache, &mut errors);
        Self::validate_server(&config.server, &mut errors);
        Self::validate_store(&config.store, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_cache(config: &crate::CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.host.trim().is_empty() {
            errors.push(ConfigValidationError::Missing { name: "Redis host" });
        }
        if config.port == 0 {
            errors.push(ConfigValidationError::Missing { name: "Redis port" });
        }
        if config.pool_size == 0 {
            errors.push(ConfigValidationError::EmptyPool { name: "Redis" });
        }
        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "cache.connect_timeout_secs",
            });
        }
        if config.liveness_interval_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "cache.liveness_interval_secs",
            });
        }
        if config.write_back_capacity == 0 {
            errors.push(ConfigValidationError::EmptyWriteBackQueue);
        }
    }

    fn validate_server(config: &crate::ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::Missing { name: "Server port" });
        }
        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs",
            });
        }
    }

    fn validate_store(config: &crate::StoreConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.host.trim().is_empty() {
            errors.push(ConfigValidationError::Missing { name: "Store host" });
        }
        if config.port == 0 {
            errors.push(ConfigValidationError::Missing { name: "Store port" });
        }
        if config.max_connections == 0 {
            errors.push(ConfigValidationError::EmptyPool { name: "Store" });
        }
        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "store.connect_timeout_secs",
            });
        }
    }

    fn validate_observability(
        config: &crate::ObservabilityConfig,
        errors: &mut Vec<ConfigValidationError>,
    ) {
        if !Self::VALID_LOG_FORMATS.contains(&config.log_format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }
        if config.metrics_enabled && !config.metrics_path.starts_with('/') {
            errors.push(ConfigValidationError::InvalidMetricsPath {
                value: config.metrics_path.clone(),
            });
        }
    }
}
