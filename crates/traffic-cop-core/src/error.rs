//! Unified error type for all layers of the service.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Traffic Cop.
///
/// The resolver only ever produces `NotFound`, `Cache`, `Store` and
/// `Internal`; `InvalidInput` belongs to the HTTP boundary and
/// `Configuration` to start-up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrafficCopError {
    /// No toggle exists for the user in either the cache or the store.
    #[error("User not found: {user_id}")]
    NotFound { user_id: String },

    /// The request did not carry a usable user id.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The cache port failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// The store port failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of [`TrafficCopError`], used for metrics labels
/// and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    CacheFailure,
    StoreFailure,
    Configuration,
    InternalFailure,
}

impl ErrorKind {
    /// Returns a stable snake_case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::CacheFailure => "cache_failure",
            Self::StoreFailure => "store_failure",
            Self::Configuration => "configuration",
            Self::InternalFailure => "internal_failure",
        }
    }
}

impl TrafficCopError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidInput(_) => 400,
            Self::Cache(_) | Self::Store(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Cache(_) => "CACHE_FAILURE",
            Self::Store(_) => "STORE_FAILURE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_FAILURE",
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Cache(_) => ErrorKind::CacheFailure,
            Self::Store(_) => ErrorKind::StoreFailure,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Internal(_) => ErrorKind::InternalFailure,
        }
    }

    /// Creates a not found error for a user.
    #[must_use]
    pub fn not_found<T: ToString>(user_id: T) -> Self {
        Self::NotFound {
            user_id: user_id.to_string(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input<T: Into<String>>(message: T) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates a store error.
    #[must_use]
    pub fn store<T: Into<String>>(message: T) -> Self {
        Self::Store(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error comes from a dependency rather than the caller.
    #[must_use]
    pub const fn is_dependency_failure(&self) -> bool {
        matches!(self, Self::Cache(_) | Self::Store(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for TrafficCopError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<serde_json::Error> for TrafficCopError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Request trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `TrafficCopError`.
    #[must_use]
    pub fn from_error(error: &TrafficCopError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&TrafficCopError> for ErrorResponse {
    fn from(error: &TrafficCopError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(TrafficCopError::not_found("u1").status_code(), 404);
        assert_eq!(TrafficCopError::invalid_input("missing userId").status_code(), 400);
        assert_eq!(TrafficCopError::cache("refused").status_code(), 500);
        assert_eq!(TrafficCopError::store("timeout").status_code(), 500);
        assert_eq!(TrafficCopError::internal("oops").status_code(), 500);
        assert_eq!(TrafficCopError::Configuration("bad".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TrafficCopError::not_found("u1").error_code(), "NOT_FOUND");
        assert_eq!(TrafficCopError::invalid_input("x").error_code(), "INVALID_INPUT");
        assert_eq!(TrafficCopError::cache("x").error_code(), "CACHE_FAILURE");
        assert_eq!(TrafficCopError::store("x").error_code(), "STORE_FAILURE");
        assert_eq!(TrafficCopError::internal("x").error_code(), "INTERNAL_FAILURE");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(TrafficCopError::cache("x").kind(), ErrorKind::CacheFailure);
        assert_eq!(TrafficCopError::store("x").kind(), ErrorKind::StoreFailure);
        assert_eq!(TrafficCopError::not_found("u").kind().as_str(), "not_found");
    }

    #[test]
    fn test_dependency_failures() {
        assert!(TrafficCopError::cache("x").is_dependency_failure());
        assert!(TrafficCopError::store("x").is_dependency_failure());
        assert!(!TrafficCopError::not_found("u").is_dependency_failure());
        assert!(!TrafficCopError::invalid_input("x").is_dependency_failure());
    }

    #[test]
    fn test_error_display_keeps_detail() {
        let err = TrafficCopError::cache("connection refused");
        assert_eq!(err.to_string(), "Cache error: connection refused");

        let err = TrafficCopError::not_found("u3");
        assert!(err.to_string().contains("u3"));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = TrafficCopError::not_found("u3");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
        assert!(response.trace_id.is_none());
    }

    #[test]
    fn test_error_response_with_trace_id() {
        let response = ErrorResponse::from(&TrafficCopError::store("down"))
            .with_trace_id("trace-123");
        assert_eq!(response.trace_id, Some("trace-123".to_string()));
    }

    #[test]
    fn test_error_response_skips_empty_fields() {
        let response = ErrorResponse::from_error(&TrafficCopError::invalid_input("missing"));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
        assert!(json.get("trace_id").is_none());
        assert_eq!(json["code"], "INVALID_INPUT");
    }
}
