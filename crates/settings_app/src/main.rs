//! # settings_app — profile settings CLI
//!
//! Loads the profile table from a JSON snapshot, runs one subcommand
//! against it, and writes the snapshot back if the command changed
//! anything.
//!
//! ## Startup Sequence
//!
//! 1. Resolve the snapshot path (`--db`, then `SETTINGS_DB`, then
//!    `settings.db.json`).
//! 2. Build the profile table with the `Profile` settings column registered.
//! 3. Load the snapshot, run the command, save if dirty.

mod commands;
mod config;
mod profile;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use settings_store::RecordTable;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::Command;
use config::AppConfig;
use profile::Profile;

#[derive(Debug, Parser)]
#[command(name = "settings_app", about = "Inspect and edit typed profile settings")]
struct Args {
    /// Snapshot file holding the profile table
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("settings_app=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(path) = args.db {
        config = config.with_db_path(path);
    }

    let table = Arc::new(RecordTable::for_model::<Profile>("profiles"));
    table
        .load_file(&config.db_path)
        .with_context(|| format!("failed to load {}", config.db_path.display()))?;

    let outcome = commands::run(args.command, &table)?;
    if !outcome.output.is_empty() {
        println!("{}", outcome.output);
    }

    if outcome.dirty {
        table
            .save_file(&config.db_path)
            .with_context(|| format!("failed to save {}", config.db_path.display()))?;
        info!(path = %config.db_path.display(), "profile table saved");
    }

    Ok(())
}
