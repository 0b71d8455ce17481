use muster_core::RecordStore;
use tracing::info;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::helpers::confirm;

use super::require_model;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.open_existing_store()?;
    let model = require_model(&store, args.id)?;

    let prompt = format!("Delete model {} ({} {})?", model.id, model.faction, model.unit_name);
    if !confirm(&prompt, args.yes)? {
        if !ctx.quiet() {
            println!("Aborted.");
        }
        return Ok(());
    }

    store.delete(model.id)?;
    store.close()?;
    info!(id = model.id, "deleted model");

    if !ctx.quiet() {
        println!("Deleted model {}", model.id);
    }
    Ok(())
}
