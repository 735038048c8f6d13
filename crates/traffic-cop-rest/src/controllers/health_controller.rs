//! Health check controller.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use traffic_cop_core::{DependencyState, HealthReport};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service name.
    pub name: String,
    /// Service version.
    pub version: String,
    /// `healthy` or `unhealthy`.
    pub status: String,
    /// Cache connection state.
    pub cache: DependencyState,
    /// Store connection state.
    pub store: DependencyState,
    /// HTTP status, repeated in the body.
    pub status_code: u16,
}

impl HealthResponse {
    fn from_report(report: &HealthReport, status: StatusCode) -> Self {
        Self {
            name: report.name.clone(),
            version: report.version.clone(),
            status: if report.is_healthy() { "healthy" } else { "unhealthy" }.to_string(),
            cache: report.cache_state(),
            store: report.store_state(),
            status_code: status.as_u16(),
        }
    }
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/live", get(liveness_check))
}

/// Dependency health check.
#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses(
        (status = 200, description = "Cache and store are connected", body = HealthResponse),
        (status = 500, description = "A dependency is not connected", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.health.check().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse::from_report(&report, status)))
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
