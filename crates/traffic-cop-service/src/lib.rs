//! # Traffic Cop Service
//!
//! Resolution and health logic for the traffic-cop service.
//!
//! - [`ToggleResolver`]: cache-aside lookup of a user's routing toggle,
//!   with fire-and-forget population of the cache through [`WriteBack`].
//! - [`HealthService`]: composes cache liveness and a store probe.
//! - [`CachePort`] and its Redis implementation.

pub mod cache;
pub mod health_service;
pub mod r#impl;
pub mod metrics;
pub mod resolver;
pub mod write_back;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::*;
pub use health_service::*;
pub use r#impl::*;
pub use resolver::*;
pub use write_back::*;
