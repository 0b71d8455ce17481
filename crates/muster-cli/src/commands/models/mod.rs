//! Model command handlers.

mod add;
mod apply;
mod delete;
mod list;
mod show;
mod update;

use muster_core::{ModelRecord, MusterError, RecordStore, SqliteStore};

use crate::errors::CliError;

pub use add::handle_add;
pub use apply::handle_apply;
pub use delete::handle_delete;
pub use list::handle_list;
pub use show::handle_show;
pub use update::handle_update;

/// Fetch a model, turning a missing id into a `CliError::NotFound` with a hint.
pub(crate) fn require_model(store: &SqliteStore, id: i64) -> anyhow::Result<ModelRecord> {
    match store.fetch_by_id(id) {
        Ok(model) => Ok(model),
        Err(MusterError::NotFound(_)) => Err(CliError::not_found(
            format!("Model {} not found", id),
            "Hint: Run `muster list` to find model IDs.",
        )
        .into()),
        Err(err) => Err(err.into()),
    }
}
