//! Core flat-file document store for Flatstore.
//! This crate is the single source of truth for persistence behavior.

pub mod identity;
pub mod logging;
pub mod store;

pub use identity::{bind_identifier, identifier_field, identifier_value};
pub use logging::{default_log_level, init_logging, logging_status};
pub use store::{DocumentStore, JsonDocumentStore, StoreError, StoreOptions, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
