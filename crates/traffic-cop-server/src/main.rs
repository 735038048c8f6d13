//! # Traffic Cop Server
//!
//! Entry point: loads configuration, initialises logging and serves the
//! routing API.

use traffic_cop_config::{ConfigLoadError, ConfigLoader};
use traffic_cop_core::telemetry::init_telemetry;
use traffic_cop_server::{app::App, startup::config_error_lines};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = match ConfigLoader::from_default_location() {
        Ok(config) => config,
        Err(ConfigLoadError::Invalid(errors)) => {
            for line in config_error_lines(&errors) {
                eprintln!("{}", line);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    init_telemetry(&config.observability.telemetry(&config.app.name))?;

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {}", config.app.environment);

    App::new(config).run().await?;
    Ok(())
}
