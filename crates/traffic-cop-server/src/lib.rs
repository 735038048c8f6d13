//! # Traffic Cop Server Library
//!
//! Component wiring and server lifecycle for the traffic-cop binary.

pub mod app;
pub mod di;
pub mod startup;
