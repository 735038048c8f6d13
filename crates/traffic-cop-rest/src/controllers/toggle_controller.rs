//! Toggle lookup controller.

use crate::{
    extractors::{require_user_id, ToggleQuery, ToggleRequest, ValidatedJson},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use traffic_cop_core::ToggleValue;
use tracing::debug;

/// Path of the toggle endpoints.
pub const TOGGLE_PATH: &str = "/svc/v1/traffic-cop";

/// Creates the toggle router.
pub fn router() -> Router<AppState> {
    Router::new().route(TOGGLE_PATH, get(get_toggle).post(post_toggle))
}

/// Resolve the routing toggle for the `userId` query parameter.
#[utoipa::path(
    get,
    path = "/svc/v1/traffic-cop",
    tag = "toggle",
    params(ToggleQuery),
    responses(
        (status = 200, description = "Routing toggle for the user", body = ToggleValue),
        (status = 400, description = "Missing or empty userId", body = traffic_cop_core::ErrorResponse),
        (status = 404, description = "User not found", body = traffic_cop_core::ErrorResponse),
        (status = 500, description = "Cache or store failure", body = traffic_cop_core::ErrorResponse)
    )
)]
pub async fn get_toggle(
    State(state): State<AppState>,
    Query(query): Query<ToggleQuery>,
) -> ApiResult<ToggleValue> {
    let user_id = require_user_id(None, query.user_id)?;
    debug!(user_id = %user_id, "Toggle lookup (GET)");

    ok(state.resolver.resolve(&user_id).await?)
}

/// Resolve the routing toggle for the `userId` in the JSON body.
///
/// Falls back to the `userId` query parameter when the body has none.
#[utoipa::path(
    post,
    path = "/svc/v1/traffic-cop",
    tag = "toggle",
    params(ToggleQuery),
    request_body = ToggleRequest,
    responses(
        (status = 200, description = "Routing toggle for the user", body = ToggleValue),
        (status = 400, description = "Malformed JSON or missing userId", body = traffic_cop_core::ErrorResponse),
        (status = 404, description = "User not found", body = traffic_cop_core::ErrorResponse),
        (status = 500, description = "Cache or store failure", body = traffic_cop_core::ErrorResponse)
    )
)]
pub async fn post_toggle(
    State(state): State<AppState>,
    Query(query): Query<ToggleQuery>,
    ValidatedJson(request): ValidatedJson<ToggleRequest>,
) -> ApiResult<ToggleValue> {
    let user_id = require_user_id(request.user_id, query.user_id)?;
    debug!(user_id = %user_id, "Toggle lookup (POST)");

    ok(state.resolver.resolve(&user_id).await?)
}
