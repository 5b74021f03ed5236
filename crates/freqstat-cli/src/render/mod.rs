//! Renderers for an analysis result
//!
//! Each renderer consumes the finished [`ReportContext`] read-only.

use freqstat_stats::analysis::Analysis;

pub mod console;
pub mod csv_table;
pub mod latex;

/// Everything the renderers need to describe one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Name of the analyzed attribute.
    pub attribute: &'a str,
    /// Records in the source file, including those with a missing value.
    pub total_records: usize,
    pub analysis: &'a Analysis,
}

/// Formats a list of values, or `none` when empty.
pub(crate) fn format_values(values: &[f64], precision: usize) -> String {
    if values.is_empty() {
        return "none".to_owned();
    }
    values
        .iter()
        .map(|v| format!("{v:.precision$}"))
        .collect::<Vec<_>>()
        .join(", ")
}
