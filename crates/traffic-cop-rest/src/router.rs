//! Main application router.

use crate::{
    controllers::{health_controller, toggle_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::time::Duration;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use traffic_cop_config::{ObservabilityConfig, ServerConfig};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Router settings taken from configuration.
#[derive(Clone)]
pub struct RouterOptions {
    /// Requests running longer than this get a 408.
    pub request_timeout: Duration,
    /// Path of the Prometheus endpoint.
    pub metrics_path: String,
    /// Recorder handle; `None` disables the endpoint.
    pub metrics: Option<PrometheusHandle>,
}

impl RouterOptions {
    /// Builds options from configuration and an optional recorder handle.
    pub fn new(
        server: &ServerConfig,
        observability: &ObservabilityConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            request_timeout: server.request_timeout(),
            metrics_path: observability.metrics_path.clone(),
            metrics,
        }
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            metrics_path: "/metrics".to_string(),
            metrics: None,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, options: RouterOptions) -> Router {
    let mut router = Router::new()
        .merge(toggle_controller::router())
        .merge(health_controller::router())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = options.metrics {
        info!("Prometheus metrics exposed at {}", options.metrics_path);
        router = router.route(
            &options.metrics_path,
            get(move || {
                let handle = handle.clone();
                async move { handle.render() }
            }),
        );
    }

    let router = router
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    info!("Router created with toggle endpoints and Swagger UI at /swagger-ui");
    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use traffic_cop_core::{HealthReport, ToggleValue, TrafficCopError, TrafficCopResult, UserId};
    use traffic_cop_service::{HealthService, ToggleResolver};

    #[derive(Default)]
    struct FakeResolver {
        outcomes: HashMap<String, TrafficCopResult<ToggleValue>>,
        seen: Mutex<Vec<String>>,
    }

    impl FakeResolver {
        fn with(mut self, user: &str, outcome: TrafficCopResult<ToggleValue>) -> Self {
            self.outcomes.insert(user.to_string(), outcome);
            self
        }
    }

    #[async_trait]
    impl ToggleResolver for FakeResolver {
        async fn resolve(&self, user_id: &UserId) -> TrafficCopResult<ToggleValue> {
            self.seen.lock().unwrap().push(user_id.to_string());
            self.outcomes
                .get(user_id.as_str())
                .cloned()
                .unwrap_or_else(|| Err(TrafficCopError::not_found(user_id)))
        }
    }

    struct FixedHealth(bool, bool);

    #[async_trait]
    impl HealthService for FixedHealth {
        async fn check(&self) -> HealthReport {
            HealthReport {
                name: "traffic-cop".to_string(),
                version: "0.1.0".to_string(),
                cache_connected: self.0,
                store_connected: self.1,
            }
        }
    }

    fn resolver() -> FakeResolver {
        FakeResolver::default()
            .with("u1", Ok(ToggleValue::from("legacy")))
            .with("u2", Ok(ToggleValue::from("microservices")))
            .with("42", Ok(ToggleValue::from("legacy")))
            .with("down", Err(TrafficCopError::cache("Connection refused")))
            .with("broken", Err(TrafficCopError::store("timeout")))
    }

    fn app_with(resolver: Arc<FakeResolver>, health: FixedHealth) -> Router {
        create_router(
            AppState::new(resolver, Arc::new(health)),
            RouterOptions::default(),
        )
    }

    fn app() -> Router {
        app_with(Arc::new(resolver()), FixedHealth(true, true))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_toggle_as_json_string() {
        let (status, body) = send(app(), get("/svc/v1/traffic-cop?userId=u1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("legacy".to_string()));
    }

    #[tokio::test]
    async fn test_get_without_user_id_is_bad_request() {
        let (status, body) = send(app(), get("/svc/v1/traffic-cop")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");

        let (status, _) = send(app(), get("/svc/v1/traffic-cop?userId=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (status, body) = send(app(), get("/svc/v1/traffic-cop?userId=u3")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_dependency_failures_are_internal_errors() {
        let (status, body) = send(app(), get("/svc/v1/traffic-cop?userId=down")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "CACHE_FAILURE");

        let (status, body) = send(app(), get("/svc/v1/traffic-cop?userId=broken")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "STORE_FAILURE");
    }

    #[tokio::test]
    async fn test_post_with_string_and_integer_ids() {
        let (status, body) = send(app(), post("/svc/v1/traffic-cop", r#"{"userId":"u2"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "microservices");

        let (status, body) = send(app(), post("/svc/v1/traffic-cop", r#"{"userId":42}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "legacy");
    }

    #[tokio::test]
    async fn test_post_falls_back_to_query() {
        let resolver = Arc::new(resolver());
        let app = app_with(resolver.clone(), FixedHealth(true, true));

        let (status, _) = send(app, post("/svc/v1/traffic-cop?userId=u1", "{}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(*resolver.seen.lock().unwrap(), vec!["u1".to_string()]);
    }

    #[tokio::test]
    async fn test_post_rejections() {
        let (status, body) = send(app(), post("/svc/v1/traffic-cop", r#"{"userId":"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");

        let (status, body) = send(app(), post("/svc/v1/traffic-cop", r#"{"userId":""}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");

        let (status, _) = send(app(), post("/svc/v1/traffic-cop", "")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_healthcheck_healthy() {
        let (status, body) = send(app(), get("/healthcheck")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "traffic-cop");
        assert_eq!(body["version"], "0.1.0");
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cache"], "Connected");
        assert_eq!(body["store"], "Connected");
        assert_eq!(body["statusCode"], 200);
    }

    #[tokio::test]
    async fn test_healthcheck_unhealthy() {
        let app = app_with(Arc::new(resolver()), FixedHealth(true, false));
        let (status, body) = send(app, get("/healthcheck")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["store"], "Not Connected");
        assert_eq!(body["statusCode"], 500);
    }

    #[tokio::test]
    async fn test_liveness_and_request_id() {
        let response = app().oneshot(get("/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_metrics_route_absent_without_recorder() {
        let response = app().oneshot(get("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
