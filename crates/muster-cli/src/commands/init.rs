use std::path::PathBuf;

use muster_core::storage::sqlite::DEFAULT_BUSY_TIMEOUT_MS;
use muster_core::{ReconcileMode, SqliteStore, StoreConfig};
use tracing::info;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_db_path, write_config, MusterConfig};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let cli = ctx.cli();
    let config_path = match &args.config_path {
        Some(path) => PathBuf::from(path),
        None => resolve_config_path()?,
    };
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Re-run with --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let db_path = match args.path.as_deref().or(cli.db.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_db_path()?,
    };
    let busy_timeout_ms = args.busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);
    let mode = if cli.atomic {
        ReconcileMode::Atomic
    } else {
        ReconcileMode::BestEffort
    };

    let store = SqliteStore::open(
        &StoreConfig::new(&db_path).with_busy_timeout_ms(busy_timeout_ms),
    )?;
    let existing = store.count()?;
    store.close()?;

    write_config(&config_path, &MusterConfig::new(db_path.clone(), busy_timeout_ms, mode))?;
    info!(db = %db_path.display(), config = %config_path.display(), "initialized");

    if !ctx.quiet() {
        println!("Database: {}", db_path.display());
        println!("Config:   {}", config_path.display());
        if existing > 0 {
            println!("Found {} existing models.", existing);
        }
    }
    Ok(())
}
