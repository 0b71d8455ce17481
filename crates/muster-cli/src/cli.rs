use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use muster_core::VERSION;

/// Muster - track a collection of tabletop miniatures from purchase to paint
#[derive(Parser)]
#[command(name = "muster")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the model database
    #[arg(short, long, global = true, env = "MUSTER_DB")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Roll back every field of a failed update instead of keeping the ones already written
    #[arg(long, global = true)]
    pub atomic: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// SQLite busy timeout in milliseconds
    #[arg(long)]
    pub busy_timeout_ms: Option<u64>,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Lifecycle fields shared by `add` and `update`
#[derive(Args)]
pub struct LifecycleArgs {
    /// Point cost
    #[arg(long)]
    pub points: Option<i64>,

    /// Build date (YYYY-MM-DD or "today")
    #[arg(long, value_name = "DATE")]
    pub build_date: Option<String>,

    /// Painted date (YYYY-MM-DD or "today")
    #[arg(long, value_name = "DATE")]
    pub painted_date: Option<String>,

    /// Image file to store with the model
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Game system
    #[arg(long)]
    pub game: String,

    /// Faction within the game
    #[arg(long)]
    pub faction: String,

    /// Unit name
    #[arg(long)]
    pub unit_name: String,

    /// Number of miniatures in the unit
    #[arg(long)]
    pub unit_size: i64,

    /// Purchase date (YYYY-MM-DD or "today"; defaults to today)
    #[arg(long, value_name = "DATE")]
    pub purchase_date: Option<String>,

    #[command(flatten)]
    pub lifecycle: LifecycleArgs,

    /// Output the stored record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `update` command
#[derive(Args)]
pub struct UpdateArgs {
    /// Model ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Faction within the game
    #[arg(long)]
    pub faction: Option<String>,

    /// Unit name
    #[arg(long)]
    pub unit_name: Option<String>,

    /// Number of miniatures in the unit
    #[arg(long)]
    pub unit_size: Option<i64>,

    /// Purchase date (YYYY-MM-DD or "today")
    #[arg(long, value_name = "DATE")]
    pub purchase_date: Option<String>,

    #[command(flatten)]
    pub lifecycle: LifecycleArgs,

    /// Output the stored record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `apply` command
#[derive(Args)]
pub struct ApplyArgs {
    /// JSON file holding the proposed record ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Output the stored record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only show models for this game
    #[arg(long)]
    pub game: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Model ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Model ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `reassign-id` command
#[derive(Args)]
pub struct ReassignIdArgs {
    /// Current model ID
    #[arg(value_name = "OLD_ID")]
    pub old_id: i64,

    /// New model ID (must be unused)
    #[arg(value_name = "NEW_ID")]
    pub new_id: i64,
}

/// Arguments for the `reset-sequence` command
#[derive(Args)]
pub struct ResetSequenceArgs {
    /// Value the next inserted ID counts up from
    #[arg(value_name = "VALUE")]
    pub value: i64,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config and create the model database
    Init(InitArgs),

    /// Add a new model to the collection
    Add(AddArgs),

    /// Update fields of an existing model (only changed fields are written)
    Update(UpdateArgs),

    /// Reconcile a JSON record against the collection (id 0 creates)
    Apply(ApplyArgs),

    /// List models
    List(ListArgs),

    /// Show a specific model by ID
    Show(ShowArgs),

    /// Delete a model
    Delete(DeleteArgs),

    /// Change a model's ID
    #[command(name = "reassign-id")]
    ReassignId(ReassignIdArgs),

    /// Reset the ID counter used for new models
    #[command(name = "reset-sequence")]
    ResetSequence(ResetSequenceArgs),

    /// Check database integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
