mod input;
mod logging;
mod menu;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use payroll_core::Ledger;
use payroll_store::FileRepository;

/// Employee payroll tracker.
///
/// Tracks per-employee invoices and commission-based weekly pay in flat
/// CSV tables under the data directory: `employees.csv` plus the
/// `invoices/`, `archived_invoices/`, and `payment_history/` folders.
#[derive(Parser, Debug)]
#[command(name = "payroll-tracker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the payroll tables (created on first write)
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Log filter directive, e.g. "info" or "payroll_core=debug"
    #[arg(short, long, default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log).context("Failed to initialize logging")?;

    let repo = FileRepository::new(&args.data_dir);
    let mut ledger = Ledger::open(repo).with_context(|| {
        format!(
            "Failed to load payroll data from: {}",
            args.data_dir.display()
        )
    })?;

    println!("{} employee(s) loaded.", ledger.employees().len());
    menu::run(&mut ledger)
}
