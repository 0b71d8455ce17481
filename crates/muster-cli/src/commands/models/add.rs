use muster_core::{reconcile_with_mode, Date, ModelRecord};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{date_arg, read_image};
use crate::output::{model_json, print_reconciliation};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let lifecycle = &args.lifecycle;
    let proposal = ModelRecord {
        id: 0,
        game: args.game.clone(),
        faction: args.faction.clone(),
        unit_name: args.unit_name.clone(),
        unit_size: args.unit_size,
        points: lifecycle.points.unwrap_or(0),
        purchase_date: args
            .purchase_date
            .as_deref()
            .map(date_arg)
            .unwrap_or_else(|| Date::today().to_string()),
        build_date: lifecycle.build_date.as_deref().map(date_arg).unwrap_or_default(),
        painted_date: lifecycle
            .painted_date
            .as_deref()
            .map(date_arg)
            .unwrap_or_default(),
        image: lifecycle.image.as_deref().map(read_image).transpose()?,
    };

    let store = ctx.open_store()?;
    let outcome = reconcile_with_mode(&store, ctx.reconcile_mode()?, &proposal)?;
    store.close()?;

    if args.json {
        println!("{}", model_json(&outcome.record)?);
    } else if ctx.quiet() {
        println!("{}", outcome.record.id);
    } else {
        print_reconciliation(&outcome);
    }
    Ok(())
}
