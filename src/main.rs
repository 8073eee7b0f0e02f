//! Binary entry point: resolve settings, bring up the database, then either
//! run one subcommand or drive the Ratatui event loop until the user exits.
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use log::info;
use travel_desk::cli::{run_command, Args};
use travel_desk::{ensure_schema, run_app, seed_sample_data, App, Store};

/// Initialize persistence and hand control to the requested front-end.
///
/// Returning a `Result` bubbles up fatal start-up problems (an unwritable
/// data directory, a corrupt database) to the terminal instead of crashing
/// silently.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.config()?;

    match &args.command {
        // The terminal UI owns stdout/stderr, so logs go to a file.
        None => init_file_logging(&config.log_file)?,
        Some(_) => env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init(),
    }

    let store = Store::new(&config.database_file);
    ensure_schema(&store)?;
    seed_sample_data(&store)?;

    match args.command {
        Some(command) => {
            let stdout = io::stdout();
            run_command(command, &config, &store, &mut stdout.lock())
        }
        None => {
            info!("starting with database {}", config.database_file.display());
            let mut app = App::new(store, config)?;
            run_app(&mut app)
        }
    }
}

fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create log directory")?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
