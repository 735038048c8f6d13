//! MySQL implementations.

mod toggle_store;

pub use toggle_store::MySqlToggleStore;
