//! # Traffic Cop Config
//!
//! Configuration management for Traffic Cop.
//! Supports layered configuration from files, structured environment
//! variables, and the flat variables used by earlier deployments.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
