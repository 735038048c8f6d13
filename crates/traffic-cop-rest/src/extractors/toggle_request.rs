//! Request shapes carrying a user id.

use serde::{Deserialize, Serialize};
use traffic_cop_core::{TrafficCopError, UserId};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// A user id as it appears on the wire: a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UserIdParam {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl UserIdParam {
    /// Converts into a [`UserId`], rejecting blank strings.
    pub fn into_user_id(self) -> Result<UserId, TrafficCopError> {
        match self {
            Self::Text(raw) => UserId::parse(raw),
            Self::Unsigned(n) => Ok(UserId::from(n)),
            Self::Signed(n) => Ok(UserId::from(n)),
        }
    }
}

fn validate_user_id_param(param: &UserIdParam) -> Result<(), ValidationError> {
    match param {
        UserIdParam::Text(raw) if raw.trim().is_empty() => {
            let mut error = ValidationError::new("user_id_empty");
            error.message = Some("userId must not be empty".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

/// Body of `POST /svc/v1/traffic-cop`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({ "userId": "u1" }))]
pub struct ToggleRequest {
    /// User to resolve. Falls back to the `userId` query parameter when absent.
    #[serde(rename = "userId", default)]
    #[validate(custom(function = "validate_user_id_param"))]
    pub user_id: Option<UserIdParam>,
}

/// Query string of the toggle endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ToggleQuery {
    /// User to resolve.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Picks the user id from the body, then the query, and validates it.
pub fn require_user_id(
    body: Option<UserIdParam>,
    query: Option<String>,
) -> Result<UserId, TrafficCopError> {
    match body {
        Some(param) => param.into_user_id(),
        None => match query {
            Some(raw) => UserId::parse(raw),
            None => Err(TrafficCopError::invalid_input("userId is required")),
        },
    }
}
