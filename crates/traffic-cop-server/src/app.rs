//! Application lifecycle.

use crate::di::AppModule;
use crate::startup::{print_banner, print_startup_info};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tracing::{info, warn};
use traffic_cop_config::AppConfig;
use traffic_cop_core::{TrafficCopError, TrafficCopResult};
use traffic_cop_rest::{create_router, RouterOptions};

/// Runs the server until a shutdown signal arrives.
pub struct App {
    config: AppConfig,
}

impl App {
    /// Creates the application from validated configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Wires components, serves HTTP, and shuts down gracefully.
    pub async fn run(self) -> TrafficCopResult<()> {
        let config = self.config;
        print_banner();

        let metrics = if config.observability.metrics_enabled {
            Some(install_metrics_recorder()?)
        } else {
            None
        };

        let module = AppModule::from_config(&config)?;

        if config.store.run_migrations {
            if let Some(pool) = module.database_pool() {
                if let Err(e) = pool.run_migrations().await {
                    warn!("Skipping migrations: {}", e);
                }
            }
        }

        let router = create_router(
            module.app_state(),
            RouterOptions::new(&config.server, &config.observability, metrics),
        );

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TrafficCopError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(&config);
        info!("Traffic Cop started on http://{}", addr);

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TrafficCopError::Internal(format!("HTTP server error: {}", e)));

        module.shutdown().await;
        info!("Server shutdown complete");
        served
    }
}

/// Installs the global Prometheus recorder and registers metric
/// descriptions.
pub fn install_metrics_recorder() -> TrafficCopResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        TrafficCopError::Configuration(format!("Failed to install metrics recorder: {}", e))
    })?;
    traffic_cop_service::metrics::register_metrics();
    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
