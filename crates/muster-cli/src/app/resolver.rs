//! Path and settings resolution for config and database files.

use std::path::PathBuf;

use muster_core::storage::sqlite::DEFAULT_BUSY_TIMEOUT_MS;
use muster_core::ReconcileMode;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{default_db_path, read_config, MusterConfig};

/// Settings a command needs to open and write to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub busy_timeout_ms: u64,
    pub mode: ReconcileMode,
}

/// Resolve the config file path, checking MUSTER_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("MUSTER_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    crate::config::default_config_path()
}

/// Resolve settings from CLI args, the config file, then defaults.
///
/// `--db` (or `MUSTER_DB`) wins over the config file's database path. A
/// missing config file is not an error; the database then lives under the
/// XDG data directory.
pub fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config_path = resolve_config_path()?;
    let config = if config_path.exists() {
        Some(read_config(&config_path)?)
    } else {
        debug!(path = %config_path.display(), "no config file; using defaults");
        None
    };

    let mut settings = settings_from(config.as_ref(), cli.db.as_deref())?;
    if cli.atomic {
        settings.mode = ReconcileMode::Atomic;
    }
    Ok(settings)
}

fn settings_from(
    config: Option<&MusterConfig>,
    db_override: Option<&str>,
) -> anyhow::Result<Settings> {
    let db_path = match (db_override, config) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(config)) => PathBuf::from(&config.database.path),
        (None, None) => default_db_path()?,
    };
    Ok(Settings {
        db_path,
        busy_timeout_ms: config
            .map(|c| c.database.busy_timeout_ms)
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
        mode: config.map(|c| c.reconcile.mode).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_override_beats_config() {
        let config =
            MusterConfig::new(PathBuf::from("/data/models.db"), 900, ReconcileMode::Atomic);
        let settings = settings_from(Some(&config), Some("/tmp/other.db")).unwrap();
        assert_eq!(settings.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(settings.busy_timeout_ms, 900);
        assert_eq!(settings.mode, ReconcileMode::Atomic);
    }

    #[test]
    fn test_config_path_used_without_override() {
        let config = MusterConfig::new(
            PathBuf::from("/data/models.db"),
            900,
            ReconcileMode::BestEffort,
        );
        let settings = settings_from(Some(&config), None).unwrap();
        assert_eq!(settings.db_path, PathBuf::from("/data/models.db"));
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = settings_from(None, Some("/tmp/models.db")).unwrap();
        assert_eq!(settings.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert_eq!(settings.mode, ReconcileMode::BestEffort);
    }
}
