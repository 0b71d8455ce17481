use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::output::{model_json, print_model};

use super::require_model;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let store = ctx.open_existing_store()?;
    let model = require_model(&store, args.id)?;
    store.close()?;

    if args.json {
        println!("{}", model_json(&model)?);
    } else {
        print_model(&model);
    }
    Ok(())
}
