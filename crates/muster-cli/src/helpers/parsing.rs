//! Parsing helpers for output format and date arguments.

use muster_core::Date;

use crate::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

/// Parse the `--format` flag.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}

/// Expand a date flag value. `today` becomes the local date; anything else is
/// passed through untouched and validated when reconciled.
pub fn date_arg(value: &str) -> String {
    if value.eq_ignore_ascii_case("today") {
        Date::today().to_string()
    } else {
        value.to_string()
    }
}
