//! Frequency analysis command
//!
//! Loads one attribute, runs the analysis engine and writes every report:
//! the console summary, the CSV frequency table, the JSON report and the
//! LaTeX document.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use freqstat_stats::analysis::{AnalysisConfig, AnalysisEngine};

use crate::{
    loader,
    render::{ReportContext, console, csv_table, latex},
    schema::report::AnalysisReport,
    util,
};

const CSV_FILE_NAME: &str = "frequency_table.csv";
const JSON_FILE_NAME: &str = "report.json";
const LATEX_FILE_NAME: &str = "report.tex";

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    /// Path to the input file (CSV with a header row, or a JSON array of numbers)
    pub input: PathBuf,

    /// Column to analyze; defaults to the first numeric column
    #[arg(long)]
    pub column: Option<String>,

    /// Number of classes; defaults to Sturges' rule
    #[arg(long)]
    pub classes: Option<usize>,

    /// Directory for the generated files
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Compute the frequency table and statistics on separate threads
    #[arg(long)]
    pub parallel: bool,

    /// Skip the LaTeX document
    #[arg(long)]
    pub no_latex: bool,

    /// Where to write the JSON report (`-` for stdout); defaults to the output directory
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// JSON file with analysis settings; command-line flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl AnalyzeArg {
    fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => AnalysisConfig::default(),
        };
        if self.classes.is_some() {
            config.num_classes = self.classes;
        }
        config.parallel |= self.parallel;
        Ok(config)
    }

    /// `None` means stdout.
    fn json_output_path(&self) -> Option<PathBuf> {
        match &self.json {
            Some(path) if path.as_os_str() == "-" => None,
            Some(path) => Some(path.clone()),
            None => Some(self.output_dir.join(JSON_FILE_NAME)),
        }
    }
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = arg.analysis_config()?;
    let json_path = arg.json_output_path();

    tracing::info!("[1/4] Loading data from {}", arg.input.display());
    let column = loader::load(&arg.input, arg.column.as_deref())
        .with_context(|| format!("Failed to load {}", arg.input.display()))?;
    tracing::info!(
        "Attribute '{}': {} records, {} observations",
        column.name,
        column.total_records,
        column.sample.len()
    );

    tracing::info!("[2/4] Computing frequency table and statistics");
    let engine = AnalysisEngine::new(config);
    let analysis = engine
        .run(&column.sample)
        .with_context(|| format!("Failed to analyze attribute '{}'", column.name))?;
    let ctx = ReportContext {
        attribute: &column.name,
        total_records: column.total_records,
        analysis: &analysis,
    };

    // The console report would interleave with JSON on stdout.
    if json_path.is_some() {
        console::print_report(&ctx).context("Failed to print report")?;
    }

    tracing::info!("[3/4] Writing tables to {}", arg.output_dir.display());
    util::ensure_dir(&arg.output_dir)?;
    let csv_path = arg.output_dir.join(CSV_FILE_NAME);
    csv_table::save(&analysis.table, &csv_path)?;
    tracing::info!("Frequency table saved to {}", csv_path.display());

    let report = AnalysisReport::new(
        arg.input.display().to_string(),
        &column.name,
        column.total_records,
        *engine.config(),
        &analysis,
    );
    let json_label = json_path
        .as_deref()
        .map_or_else(|| "stdout".to_owned(), |p| p.display().to_string());
    util::save_json(&report, json_path)?;
    tracing::info!("JSON report saved to {json_label}");

    if arg.no_latex {
        tracing::info!("[4/4] Skipping LaTeX document");
    } else {
        tracing::info!("[4/4] Writing LaTeX document");
        let tex_path = arg.output_dir.join(LATEX_FILE_NAME);
        latex::save(&ctx, &tex_path)?;
        tracing::info!(
            "LaTeX document saved to {} (compile with: pdflatex {})",
            tex_path.display(),
            file_name(&tex_path)
        );
    }

    tracing::info!(
        "Analysis complete: {} classes over {} observations",
        analysis.table.len(),
        analysis.table.sample_size()
    );
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
