//! # Traffic Cop Core
//!
//! Core types and error definitions shared by every layer of the
//! traffic-cop service: typed identifiers, the toggle value, the store row
//! shape, the health report, and the unified error type.

pub mod error;
pub mod health;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod toggle;

pub use error::*;
pub use health::*;
pub use id::*;
pub use result::*;
pub use toggle::*;
