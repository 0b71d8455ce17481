//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying models
//! in various formats (JSON, table, plain text).

mod json;
mod text;

// Re-export public API
pub use json::{model_json, models_json};
pub use text::{print_model, print_model_list, print_reconciliation};
