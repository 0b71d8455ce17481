//! Application-level utilities for the Muster CLI.
//!
//! This module provides:
//! - Path resolution for config and database files
//! - An `AppContext` that opens the store with resolved settings

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::resolve_config_path;
