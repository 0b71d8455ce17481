use muster_core::RecordStore;
use tracing::info;

use crate::app::AppContext;
use crate::cli::ResetSequenceArgs;
use crate::errors::CliError;

pub fn handle_reset_sequence(ctx: &AppContext, args: &ResetSequenceArgs) -> anyhow::Result<()> {
    if args.value < 0 {
        return Err(CliError::invalid_input(format!(
            "Sequence value must not be negative, got {}",
            args.value
        ))
        .into());
    }

    let store = ctx.open_existing_store()?;
    store.reset_autoincrement(args.value)?;
    store.close()?;
    info!(value = args.value, "reset id sequence");

    if !ctx.quiet() {
        println!("Sequence reset to {}", args.value);
    }
    Ok(())
}
