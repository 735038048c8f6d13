//! The routing toggle and the store row it is read from.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Routing decision for a user, e.g. `legacy` or `microservices`.
///
/// Opaque to the service: whatever string the store holds is returned
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ToggleValue(String);

impl ToggleValue {
    /// Wraps a raw toggle string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the toggle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ToggleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ToggleValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ToggleValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A row of the durable user store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoreRow {
    /// The platform column, read as the toggle.
    pub platform: String,
}

impl StoreRow {
    /// Creates a row with the given platform.
    #[must_use]
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }

    /// Returns the toggle carried by this row.
    #[must_use]
    pub fn toggle(&self) -> ToggleValue {
        ToggleValue::new(self.platform.clone())
    }
}
