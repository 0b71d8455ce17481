//! Input helpers: JSON proposals, image files, and confirmations.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use dialoguer::Confirm;

use crate::errors::CliError;

/// Read a JSON document from a file, or from stdin when `file` is `None` or `-`.
pub fn read_json_input(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e)),
        _ => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(CliError::invalid_input(
                    "No input provided. Pass a JSON file or pipe a record on stdin.",
                )
                .into());
            }
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Read an image file into memory.
pub fn read_image(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        CliError::invalid_input(format!("Failed to read image {}: {}", path.display(), e)).into()
    })
}

/// Ask for confirmation. Without a terminal there is no one to ask, so the
/// caller must pass `--yes` instead.
pub fn confirm(prompt: &str, skip: bool) -> anyhow::Result<bool> {
    if skip {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "Refusing to prompt without a terminal. Re-run with --yes to confirm.",
        )
        .into());
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
