//! Server startup utilities.

use tracing::info;
use traffic_cop_config::{AppConfig, ConfigValidationError};

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
  _____           __  __ _         ____
 |_   _| __ __ _ / _|/ _(_) ___   / ___|___  _ __
   | || '__/ _` | |_| |_| |/ __| | |   / _ \| '_ \
   | || | | (_| |  _|  _| | (__  | |__| (_) | |_) |
   |_||_|  \__,_|_| |_| |_|\___|  \____\___/| .__/
                                            |_|
    "#);
}

/// Prints where the server can be reached.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Toggle:    http://{}/svc/v1/traffic-cop?userId=<id>", addr);
    info!("Health:    http://{}/healthcheck", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}{}", addr, config.observability.metrics_path);
    }
    info!("Cache:     {}", config.cache.url());
    info!(
        "Store:     {}:{}/{}",
        config.store.host, config.store.port, config.store.database
    );
    info!("{}", separator);
}

/// Lines printed to stderr when the configuration is rejected, one per
/// problem followed by a closing summary.
pub fn config_error_lines(errors: &[ConfigValidationError]) -> Vec<String> {
    errors
        .iter()
        .map(ToString::to_string)
        .chain(std::iter::once(
            "Process can not be started due to missing or invalid configuration".to_string(),
        ))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }

    #[test]
    fn test_config_error_lines() {
        let lines = config_error_lines(&[
            ConfigValidationError::Missing { name: "Redis host" },
            ConfigValidationError::Missing { name: "Server port" },
        ]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Redis host is missing!");
        assert_eq!(lines[1], "Server port is missing!");
    }
}
