use muster_core::RecordStore;
use tracing::info;

use crate::app::AppContext;
use crate::cli::ReassignIdArgs;
use crate::commands::models::require_model;
use crate::errors::CliError;

pub fn handle_reassign_id(ctx: &AppContext, args: &ReassignIdArgs) -> anyhow::Result<()> {
    if args.new_id <= 0 {
        return Err(CliError::invalid_input(format!(
            "New ID must be positive, got {}",
            args.new_id
        ))
        .into());
    }

    let store = ctx.open_existing_store()?;
    require_model(&store, args.old_id)?;
    store.reassign_id(args.old_id, args.new_id)?;
    store.close()?;
    info!(old_id = args.old_id, new_id = args.new_id, "reassigned model id");

    if !ctx.quiet() {
        println!("Model {} is now {}", args.old_id, args.new_id);
    }
    Ok(())
}
