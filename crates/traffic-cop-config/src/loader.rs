//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidationError, ConfigValidator};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use traffic_cop_core::TrafficCopError;

/// Prefix of structured environment overrides, e.g. `TRAFFIC_COP__CACHE__HOST`.
const ENV_PREFIX: &str = "TRAFFIC_COP";

/// Variable selecting the environment-specific config file.
const ENVIRONMENT_VAR: &str = "TRAFFIC_COP_ENVIRONMENT";

/// Environment used when [`ENVIRONMENT_VAR`] is unset. No file ships for it,
/// so required values must come from the environment.
const DEFAULT_ENVIRONMENT: &str = "production";

/// Legacy debug switch; only the exact value `true` enables it.
const DEBUG_VAR: &str = "DEBUG";

/// Flat variables understood by earlier deployments, mapped onto config keys.
const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("REDIS_HOST", "cache.host"),
    ("REDIS_PORT", "cache.port"),
    ("CASSANDRA_HOST", "store.host"),
    ("STORE_HOST", "store.host"),
    ("SERVER_PORT", "server.port"),
];

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// A source could not be read or deserialized.
    #[error("Failed to load configuration: {0}")]
    Source(#[from] ConfigError),

    /// The merged configuration is incomplete or inconsistent.
    #[error("Invalid configuration: {} problem(s)", .0.len())]
    Invalid(Vec<ConfigValidationError>),
}

impl From<ConfigLoadError> for TrafficCopError {
    fn from(err: ConfigLoadError) -> Self {
        match err {
            ConfigLoadError::Source(e) => TrafficCopError::Configuration(e.to_string()),
            ConfigLoadError::Invalid(errors) => TrafficCopError::Configuration(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
        }
    }
}

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates configuration from `config_dir` and the process
    /// environment.
    ///
    /// Sources are merged in order:
    /// 1. `{config_dir}/default.toml`
    /// 2. `{config_dir}/{environment}.toml`
    /// 3. `{config_dir}/local.toml`
    /// 4. `TRAFFIC_COP__SECTION__KEY` environment variables
    /// 5. Legacy flat variables (`REDIS_HOST`, `REDIS_PORT`, `CASSANDRA_HOST`,
    ///    `STORE_HOST`, `SERVER_PORT`, `DEBUG`)
    pub fn load(config_dir: impl AsRef<Path>) -> Result<AppConfig, ConfigLoadError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(config_dir, &vars)
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<AppConfig, ConfigLoadError> {
        Self::load("./config")
    }

    /// Loads configuration using an explicit set of environment variables.
    pub fn load_with_env(
        config_dir: impl AsRef<Path>,
        vars: &HashMap<String, String>,
    ) -> Result<AppConfig, ConfigLoadError> {
        let config_dir = config_dir.as_ref();
        let environment = vars
            .get(ENVIRONMENT_VAR)
            .cloned()
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        let structured: HashMap<String, String> = vars
            .iter()
            .filter(|(key, _)| key.starts_with(&format!("{}__", ENV_PREFIX)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(Some(structured)),
        );

        builder = Self::apply_legacy_env(builder, vars)?;

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.app.environment = environment;

        ConfigValidator::validate(&app_config).map_err(ConfigLoadError::Invalid)?;

        Ok(app_config)
    }

    fn apply_legacy_env(
        mut builder: ConfigBuilder<DefaultState>,
        vars: &HashMap<String, String>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        for (var, key) in LEGACY_ENV_VARS {
            if let Some(value) = vars.get(*var).filter(|v| !v.is_empty()) {
                debug!("Applying {} to {}", var, key);
                builder = builder.set_override(*key, value.clone())?;
            }
        }
        if let Some(value) = vars.get(DEBUG_VAR) {
            builder = builder.set_override("observability.debug", value == "true")?;
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn legacy_vars() -> HashMap<String, String> {
        vars(&[
            ("REDIS_HOST", "localhost"),
            ("REDIS_PORT", "6379"),
            ("CASSANDRA_HOST", "cassandra.local"),
            ("SERVER_PORT", "5000"),
            ("DEBUG", "true"),
        ])
    }

    #[test]
    fn test_legacy_environment_variables() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_with_env(dir.path(), &legacy_vars()).unwrap();

        assert_eq!(config.cache.host, "localhost");
        assert_eq!(config.cache.port, 6379);
        assert_eq!(config.store.host, "cassandra.local");
        assert_eq!(config.server.port, 5000);
        assert!(config.observability.debug);
        assert_eq!(config.app.environment, "production");
    }

    fn with_debug(value: &str) -> HashMap<String, String> {
        let mut env = legacy_vars();
        env.insert("DEBUG".to_string(), value.to_string());
        env
    }

    #[test]
    fn test_only_exact_true_enables_debug() {
        let dir = tempfile::tempdir().unwrap();

        for value in ["*", "false", "yes", "1", ""] {
            let config = ConfigLoader::load_with_env(dir.path(), &with_debug(value)).unwrap();
            assert!(!config.observability.debug, "DEBUG={value:?}");
        }
    }

    #[test]
    fn test_debug_false_overrides_file_setting() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [observability]
            debug = true
            "#,
        )
        .unwrap();

        let config = ConfigLoader::load_with_env(dir.path(), &with_debug("false")).unwrap();
        assert!(!config.observability.debug);
    }

    #[test]
    fn test_development_file_requires_explicit_environment() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("development.toml"),
            r#"
            [server]
            port = 5000

            [cache]
            host = "localhost"
            port = 6379

            [store]
            host = "localhost"
            "#,
        )
        .unwrap();

        let err = ConfigLoader::load_with_env(dir.path(), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));

        let env = vars(&[("TRAFFIC_COP_ENVIRONMENT", "development")]);
        let config = ConfigLoader::load_with_env(dir.path(), &env).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_missing_environment_reports_all_problems() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load_with_env(dir.path(), &HashMap::new()).unwrap_err();

        match err {
            ConfigLoadError::Invalid(errors) => assert_eq!(errors.len(), 4),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_file_layers_and_structured_env() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [cache]
            host = "redis.default"
            port = 6379

            [store]
            host = "db.default"

            [server]
            port = 8080
            "#,
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            r#"
            [cache]
            host = "redis.staging"
            "#,
        )
        .unwrap();

        let env = vars(&[
            ("TRAFFIC_COP_ENVIRONMENT", "staging"),
            ("TRAFFIC_COP__STORE__DATABASE", "routing"),
        ]);
        let config = ConfigLoader::load_with_env(dir.path(), &env).unwrap();

        assert_eq!(config.cache.host, "redis.staging");
        assert_eq!(config.store.host, "db.default");
        assert_eq!(config.store.database, "routing");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.app.environment, "staging");
    }

    #[test]
    fn test_legacy_variables_override_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [server]
            port = 8080
            "#,
        )
        .unwrap();

        let config = ConfigLoader::load_with_env(dir.path(), &legacy_vars()).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_error_converts_to_configuration_error() {
        let err = ConfigLoadError::Invalid(vec![ConfigValidationError::Missing {
            name: "Redis host",
        }]);
        let converted: TrafficCopError = err.into();
        assert_eq!(
            converted,
            TrafficCopError::Configuration("Redis host is missing!".to_string())
        );
    }
}
