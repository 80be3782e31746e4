//! Restaurant Inventory - console stock tracker
//!
//! Runs the interactive menu by default; one-shot subcommands cover the same
//! operations for scripting.

use clap::Parser;
use restaurant_inventory::{
    default_db_path, run_command, Command, InventoryManager, Result, SqliteStore, StoreConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Restaurant inventory tracker backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "restaurant_inventory")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, default_value_os_t = default_db_path())]
    database: PathBuf,

    /// How long a statement waits on a locked database before failing
    #[arg(long, default_value_t = restaurant_inventory::database::DEFAULT_BUSY_TIMEOUT_MS)]
    busy_timeout_ms: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> ExitCode {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=restaurant_inventory=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            log::error!("Application error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Opens the store, runs one command and closes the store again.
///
/// The store lives only inside this function, so its connection is released
/// on every return path before `main` exits.
fn run(args: Args) -> Result<ExitCode> {
    let config = StoreConfig::new(&args.database)
        .with_busy_timeout(Duration::from_millis(args.busy_timeout_ms));
    log::info!("Database path: {}", config.path.display());

    let store = SqliteStore::open(&config)?;
    let mut manager = InventoryManager::new(store);
    let stdin = std::io::stdin();
    let outcome = run_command(
        &mut manager,
        args.command.unwrap_or(Command::Menu),
        stdin.lock(),
        std::io::stdout(),
        std::io::stderr(),
    )?;

    manager.into_store().close()?;
    Ok(outcome.into())
}
