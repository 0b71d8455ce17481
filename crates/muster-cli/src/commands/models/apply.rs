use muster_core::{reconcile_with_mode, ModelRecord};

use crate::app::AppContext;
use crate::cli::ApplyArgs;
use crate::errors::CliError;
use crate::helpers::read_json_input;
use crate::output::{model_json, print_reconciliation};

pub fn handle_apply(ctx: &AppContext, args: &ApplyArgs) -> anyhow::Result<()> {
    let input = read_json_input(args.file.as_deref())?;
    let proposal: ModelRecord = serde_json::from_str(&input)
        .map_err(|e| CliError::invalid_input(format!("Invalid model JSON: {}", e)))?;

    let store = ctx.open_store()?;
    let outcome = reconcile_with_mode(&store, ctx.reconcile_mode()?, &proposal)?;
    store.close()?;

    if args.json {
        println!("{}", model_json(&outcome.record)?);
    } else if !ctx.quiet() {
        print_reconciliation(&outcome);
    }
    Ok(())
}
