//! JSON output formatting for models.

use muster_core::ModelRecord;

/// A single model as pretty-printed JSON, using the record's wire names.
pub fn model_json(model: &ModelRecord) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// A list of models as a pretty-printed JSON array.
pub fn models_json(models: &[ModelRecord]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(models)?)
}
