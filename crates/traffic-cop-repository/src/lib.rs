//! # Traffic Cop Repository
//!
//! The store port and its SQLx implementation.
//!
//! ```text
//! Resolver / HealthAggregator
//!   ↓  Arc<dyn StorePort>
//! MySqlToggleStore
//!   ↓  DatabasePool (lazy sqlx::MySqlPool)
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
