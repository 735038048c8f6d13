//! REST API controllers.

pub mod health_controller;
pub mod toggle_controller;

pub use health_controller::*;
pub use toggle_controller::*;
