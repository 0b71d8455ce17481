//! Text and table output formatting for models.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use muster_core::{ModelRecord, Reconciliation};

use crate::helpers::OutputFormat;

const LIST_HEADERS: [&str; 9] = [
    "ID", "GAME", "FACTION", "UNIT", "SIZE", "POINTS", "PURCHASED", "BUILT", "PAINTED",
];

/// Where a model is in its purchase, build, paint lifecycle.
fn stage(model: &ModelRecord) -> &'static str {
    if !model.painted_date.is_empty() {
        "painted"
    } else if !model.build_date.is_empty() {
        "built"
    } else {
        "unbuilt"
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn list_row(model: &ModelRecord) -> Vec<String> {
    vec![
        model.id.to_string(),
        model.game.clone(),
        model.faction.clone(),
        model.unit_name.clone(),
        model.unit_size.to_string(),
        model.points.to_string(),
        or_dash(&model.purchase_date).to_string(),
        or_dash(&model.build_date).to_string(),
        or_dash(&model.painted_date).to_string(),
    ]
}

/// Print a list of models as a table or tab-separated plain rows.
pub fn print_model_list(models: &[ModelRecord], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(LIST_HEADERS);
            for model in models {
                table.add_row(list_row(model));
            }
            println!("{}", table);
        }
        OutputFormat::Plain => {
            for model in models {
                println!("{}", list_row(model).join("\t"));
            }
        }
    }
}

/// Print one model as labelled lines.
pub fn print_model(model: &ModelRecord) {
    println!("ID:        {}", model.id);
    println!("Game:      {}", model.game);
    println!("Faction:   {}", model.faction);
    println!("Unit:      {}", model.unit_name);
    println!("Size:      {}", model.unit_size);
    println!("Points:    {}", model.points);
    println!("Purchased: {}", or_dash(&model.purchase_date));
    println!("Built:     {}", or_dash(&model.build_date));
    println!("Painted:   {}", or_dash(&model.painted_date));
    println!("Stage:     {}", stage(model));
    match &model.image {
        Some(image) => println!("Image:     {} bytes", image.len()),
        None => println!("Image:     -"),
    }
}

/// Print a one-line summary of a reconciliation.
pub fn print_reconciliation(outcome: &Reconciliation) {
    let id = outcome.record.id;
    if outcome.created {
        println!("Added model {}", id);
    }
    if !outcome.applied.is_empty() {
        let fields: Vec<&str> = outcome.applied.iter().map(|f| f.name()).collect();
        println!("Updated model {} ({})", id, fields.join(", "));
    } else if !outcome.created {
        println!("No changes to model {}", id);
    }
}
