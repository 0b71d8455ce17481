use muster_core::RecordStore;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::helpers::{parse_output_format, OutputFormat};
use crate::output::{models_json, print_model_list};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    let store = ctx.open_existing_store()?;
    let mut models = store.fetch_all()?;
    store.close()?;

    if let Some(game) = &args.game {
        models.retain(|m| m.game.eq_ignore_ascii_case(game));
    }

    if args.json {
        println!("{}", models_json(&models)?);
        return Ok(());
    }

    if models.is_empty() {
        if !ctx.quiet() {
            println!("No models found.");
        }
        return Ok(());
    }

    let format = format.unwrap_or(if ctx.quiet() {
        OutputFormat::Plain
    } else {
        OutputFormat::Table
    });
    print_model_list(&models, format);
    Ok(())
}
