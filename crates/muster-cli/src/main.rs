//! Muster CLI - track a collection of tabletop miniatures from purchase to paint
//!
//! This is the command-line interface for Muster. It provides a user-friendly
//! interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{init, maintenance, misc, models};
use crate::errors::{exit_code_for, hint_for};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = hint_for(&e) {
            eprintln!("{}", hint);
        }
        std::process::exit(exit_code_for(&e));
    }
}

/// Install the stderr log subscriber. `MUSTER_LOG` takes an `EnvFilter`
/// directive and overrides `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("MUSTER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            models::handle_add(ctx, args)?;
        }
        Some(Commands::Update(args)) => {
            models::handle_update(ctx, args)?;
        }
        Some(Commands::Apply(args)) => {
            models::handle_apply(ctx, args)?;
        }
        Some(Commands::List(args)) => {
            models::handle_list(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            models::handle_show(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            models::handle_delete(ctx, args)?;
        }
        Some(Commands::ReassignId(args)) => {
            maintenance::handle_reassign_id(ctx, args)?;
        }
        Some(Commands::ResetSequence(args)) => {
            maintenance::handle_reset_sequence(ctx, args)?;
        }
        Some(Commands::Check) => {
            maintenance::handle_check(ctx)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args.shell)?;
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}
