use crate::app::AppContext;
use crate::errors::CliError;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_existing_store()?;
    match store.check_integrity() {
        Ok(()) => {
            let count = store.count()?;
            store.close()?;
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- models: {}", count);
            }
            Ok(())
        }
        Err(err) => Err(CliError::IntegrityFailed(format!(
            "Integrity check: FAILED\n- error: {}\nHint: Restore the database file from a backup.",
            err
        ))
        .into()),
    }
}
