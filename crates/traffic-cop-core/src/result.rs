//! Result type aliases for Traffic Cop.

use crate::TrafficCopError;

/// A specialized `Result` type for Traffic Cop operations.
pub type TrafficCopResult<T> = Result<T, TrafficCopError>;
