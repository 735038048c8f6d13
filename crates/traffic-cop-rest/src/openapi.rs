//! OpenAPI documentation.

use crate::controllers::HealthResponse;
use crate::extractors::{ToggleRequest, UserIdParam};
use traffic_cop_core::{DependencyState, ErrorResponse, FieldError, ToggleValue};
use utoipa::OpenApi;

/// OpenAPI documentation for the traffic-cop API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Traffic Cop API",
        description = "Routes each user to the legacy or the microservices stack",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::toggle_controller::get_toggle,
        crate::controllers::toggle_controller::post_toggle,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ToggleValue,
            ToggleRequest,
            UserIdParam,
            HealthResponse,
            DependencyState,
            ErrorResponse,
            FieldError,
        )
    ),
    tags(
        (name = "toggle", description = "Routing toggle lookup"),
        (name = "health", description = "Health and liveness checks")
    )
)]
pub struct ApiDoc;
