//! Application context for the Muster CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-resolved settings.

use once_cell::unsync::OnceCell;

use muster_core::{ReconcileMode, SqliteStore, StoreConfig};
use tracing::debug;

use crate::cli::Cli;
use crate::errors::CliError;

use super::resolver::{resolve_settings, Settings};

/// Application context that bundles CLI args with resolved settings.
///
/// This avoids re-reading the config file and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    settings: OnceCell<Settings>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            settings: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the resolved settings, loading them lazily if needed.
    pub fn settings(&self) -> anyhow::Result<&Settings> {
        self.settings.get_or_try_init(|| resolve_settings(self.cli))
    }

    /// How reconciliations should treat partial failures.
    pub fn reconcile_mode(&self) -> anyhow::Result<ReconcileMode> {
        Ok(self.settings()?.mode)
    }

    /// Open the model database, creating it if needed.
    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        open_store_at(self.settings()?)
    }

    /// Open the model database, failing if the file does not exist yet.
    pub fn open_existing_store(&self) -> anyhow::Result<SqliteStore> {
        let settings = self.settings()?;
        if !settings.db_path.exists() {
            return Err(CliError::not_found(
                format!("No database found at {}", settings.db_path.display()),
                "Hint: Run `muster init` or check the --db path.",
            )
            .into());
        }
        open_store_at(settings)
    }
}

fn open_store_at(settings: &Settings) -> anyhow::Result<SqliteStore> {
    debug!(path = %settings.db_path.display(), "opening model database");
    let config =
        StoreConfig::new(&settings.db_path).with_busy_timeout_ms(settings.busy_timeout_ms);
    Ok(SqliteStore::open(&config)?)
}
