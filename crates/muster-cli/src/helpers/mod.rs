//! Helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Parsing output formats and date arguments
//! - Reading JSON and image input
//! - Confirmation prompts

mod input;
mod parsing;

// Re-export public API
pub use input::{confirm, read_image, read_json_input};
pub use parsing::{date_arg, parse_output_format, OutputFormat};
