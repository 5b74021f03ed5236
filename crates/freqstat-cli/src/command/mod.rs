use std::{env, io};

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use self::{analyze::AnalyzeArg, columns::ColumnsArg};

mod analyze;
mod columns;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Build the frequency table and statistics for one attribute
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// List the columns of a CSV file and whether they are numeric
    Columns(#[clap(flatten)] ColumnsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Columns(arg) => columns::run(&arg)?,
    }
    Ok(())
}

/// Diagnostics go to stderr so that stdout stays clean for reports and JSON.
fn init_logging() {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
