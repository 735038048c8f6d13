//! Custom Axum extractors.

mod toggle_request;
mod validated;

pub use toggle_request::*;
pub use validated::*;
