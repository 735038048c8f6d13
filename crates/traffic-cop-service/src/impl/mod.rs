//! Service implementations.
//!
//! Trait definitions live in the parent module (`resolver.rs`,
//! `health_service.rs`).

pub mod health_aggregator;
pub mod toggle_resolver_impl;

pub use health_aggregator::HealthAggregator;
pub use toggle_resolver_impl::ToggleResolverImpl;
