use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::Args;

use crate::loader;

#[derive(Debug, Clone, Args)]
pub(crate) struct ColumnsArg {
    /// Path to the CSV file
    pub input: PathBuf,
}

pub(crate) fn run(arg: &ColumnsArg) -> anyhow::Result<()> {
    let file = File::open(&arg.input)
        .with_context(|| format!("Failed to open input file: {}", arg.input.display()))?;
    let summaries = loader::describe_csv_columns(BufReader::new(file))
        .with_context(|| format!("Failed to read columns of {}", arg.input.display()))?;

    let name_width = summaries
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0)
        .max(6);
    println!(
        "{:<name_width$} {:>8} {:>8} {:>8}",
        "Column", "Numeric", "Present", "Missing"
    );
    println!("{}", "-".repeat(name_width + 27));
    for summary in &summaries {
        println!(
            "{:<name_width$} {:>8} {:>8} {:>8}",
            summary.name,
            if summary.numeric { "yes" } else { "no" },
            summary.present,
            summary.missing
        );
    }
    Ok(())
}
