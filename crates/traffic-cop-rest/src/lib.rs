//! # Traffic Cop REST
//!
//! HTTP surface of the traffic-cop service: toggle lookup by user id,
//! dependency health, liveness, metrics and API docs.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
