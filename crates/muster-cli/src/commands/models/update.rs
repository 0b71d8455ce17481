use muster_core::reconcile_with_mode;

use crate::app::AppContext;
use crate::cli::UpdateArgs;
use crate::helpers::{date_arg, read_image};
use crate::output::{model_json, print_reconciliation};

use super::require_model;

/// Overlay the given flags on the stored record and reconcile the result, so
/// only the fields that actually differ are written.
pub fn handle_update(ctx: &AppContext, args: &UpdateArgs) -> anyhow::Result<()> {
    let store = ctx.open_existing_store()?;
    let mut proposal = require_model(&store, args.id)?;
    // Stored images are re-sent only when a new one is given.
    proposal.image = None;

    if let Some(faction) = &args.faction {
        proposal.faction = faction.clone();
    }
    if let Some(unit_name) = &args.unit_name {
        proposal.unit_name = unit_name.clone();
    }
    if let Some(unit_size) = args.unit_size {
        proposal.unit_size = unit_size;
    }
    if let Some(date) = &args.purchase_date {
        proposal.purchase_date = date_arg(date);
    }

    let lifecycle = &args.lifecycle;
    if let Some(points) = lifecycle.points {
        proposal.points = points;
    }
    if let Some(date) = &lifecycle.build_date {
        proposal.build_date = date_arg(date);
    }
    if let Some(date) = &lifecycle.painted_date {
        proposal.painted_date = date_arg(date);
    }
    if let Some(path) = &lifecycle.image {
        proposal.image = Some(read_image(path)?);
    }

    let outcome = reconcile_with_mode(&store, ctx.reconcile_mode()?, &proposal)?;
    store.close()?;

    if args.json {
        println!("{}", model_json(&outcome.record)?);
    } else if !ctx.quiet() {
        print_reconciliation(&outcome);
    }
    Ok(())
}
