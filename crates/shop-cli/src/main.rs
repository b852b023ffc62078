//! Shop store CLI.
//!
//! Provides the `shop` binary, which rebuilds the shop database from
//! scratch, seeds the fixed dataset, prints the user, product and purchase
//! reports, then reprices one product and removes one user.
//!
//! Configuration:
//! - `--db <PATH>`, else `SHOP_DB_PATH`, else `shop.db`
//! - `RUST_LOG` for log filtering (logs go to stderr; stdout carries only
//!   report output)

use std::io::{self, Write};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shop_storage::scenario;
use shop_storage::{ShopStore, SqliteStore, StorageError};

const DEFAULT_DB_PATH: &str = "shop.db";

/// Seed a fresh shop database, report on it, then apply the fixed mutations.
#[derive(Parser)]
#[command(name = "shop", about = "Seed, report on and mutate the shop database")]
struct Cli {
    /// Path to the database file. It is deleted and recreated on every run.
    #[arg(short, long)]
    db: Option<String>,

    /// Print the three reports again after the mutations.
    #[arg(long)]
    final_report: bool,

    /// Print table row counts as JSON once the run completes.
    #[arg(long)]
    stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db.clone(), std::env::var("SHOP_DB_PATH").ok());

    let exit_code = match run(&cli, &db_path, &mut io::stdout().lock()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    };
    process::exit(exit_code);
}

/// `--db` wins over `SHOP_DB_PATH`, which wins over `shop.db`.
fn resolve_db_path(cli_db: Option<String>, env: Option<String>) -> String {
    cli_db
        .or(env)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
}

/// Execute the full run against the database at `db_path`, writing report
/// output to `out`.
///
/// The store, and with it the connection, is dropped on every return path.
fn run(cli: &Cli, db_path: &str, out: &mut impl Write) -> Result<(), StorageError> {
    let mut store = SqliteStore::recreate(db_path)?;

    scenario::seed(&mut store)?;
    write_lines(out, &scenario::report_lines(&store)?)?;

    scenario::apply_mutations(&mut store)?;

    if cli.final_report {
        write_lines(out, &scenario::report_lines(&store)?)?;
    }

    if cli.stats {
        let stats = store.stats()?;
        serde_json::to_writer_pretty(&mut *out, &stats).map_err(io::Error::from)?;
        writeln!(out)?;
    }

    tracing::info!(path = db_path, "shop run complete");
    Ok(())
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Exit codes: 1 = constraint violation, 3 = database or I/O failure.
fn exit_code_for(err: &StorageError) -> i32 {
    if err.is_constraint_violation() {
        1
    } else {
        3
    }
}
