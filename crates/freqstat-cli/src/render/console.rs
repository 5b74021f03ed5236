//! Plain-text report on stdout
//!
//! Prints the frequency table, a horizontal bar chart of the absolute
//! frequencies and the descriptive statistics in fixed-width columns.

use std::io::{self, Write};

use freqstat_stats::{descriptive::DescriptiveStats, frequency::FrequencyTable};

use super::{ReportContext, format_values};

/// Width of the longest bar in the frequency chart
const BAR_WIDTH: usize = 40;

/// Decimals shown for statistics
const STAT_DECIMALS: usize = 4;

pub fn print_report(ctx: &ReportContext<'_>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_report(&mut out, ctx)?;
    out.flush()
}

pub fn write_report<W>(out: &mut W, ctx: &ReportContext<'_>) -> io::Result<()>
where
    W: Write,
{
    let table = &ctx.analysis.table;
    writeln!(
        out,
        "Frequency Analysis: '{}' ({} records, {} observations)",
        ctx.attribute,
        ctx.total_records,
        table.sample_size()
    )?;
    writeln!(out, "{}", "=".repeat(72))?;
    writeln!(out)?;

    write_frequency_table(out, table)?;
    writeln!(out)?;
    write_bar_chart(out, table)?;
    writeln!(out)?;
    write_statistics(out, &ctx.analysis.stats)?;
    Ok(())
}

fn write_frequency_table<W>(out: &mut W, table: &FrequencyTable) -> io::Result<()>
where
    W: Write,
{
    let labels = table
        .rows()
        .iter()
        .map(|row| table.interval_label(&row.interval))
        .collect::<Vec<_>>();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0).max(8);

    writeln!(
        out,
        "  {:<label_width$} {:>12} {:>6} {:>8} {:>8} {:>6} {:>8} {:>8}",
        "Interval", "Class mark", "fi", "hi", "%", "Fi", "Hi", "F%"
    )?;
    writeln!(out, "  {}", "-".repeat(label_width + 64))?;
    for (row, label) in table.rows().iter().zip(&labels) {
        writeln!(
            out,
            "  {:<label_width$} {:>12} {:>6} {:>8.4} {:>8.2} {:>6} {:>8.4} {:>8.2}",
            label,
            table.class_mark_label(row.class_mark),
            row.absolute,
            row.relative,
            row.percentage,
            row.cumulative_absolute,
            row.cumulative_relative,
            row.cumulative_percentage,
        )?;
    }
    if let Some(modal) = table.modal_class() {
        writeln!(
            out,
            "  modal class: {} ({} observations)",
            table.interval_label(&modal.interval),
            modal.absolute
        )?;
    }
    if let Some(notice) = table.degenerate_range() {
        writeln!(out, "  note: {notice}")?;
    }
    Ok(())
}

fn write_bar_chart<W>(out: &mut W, table: &FrequencyTable) -> io::Result<()>
where
    W: Write,
{
    let max_count = table.rows().iter().map(|r| r.absolute).max().unwrap_or(0);
    writeln!(out, "  Histogram")?;
    for (i, row) in table.rows().iter().enumerate() {
        let bar = bar_length(row.absolute, max_count);
        writeln!(
            out,
            "  C{:<3} {:<BAR_WIDTH$} {}",
            i + 1,
            "#".repeat(bar),
            row.absolute
        )?;
    }
    Ok(())
}

fn bar_length(count: usize, max_count: usize) -> usize {
    if max_count == 0 {
        return 0;
    }
    // Round to nearest, but keep non-empty classes visible.
    let len = (count * BAR_WIDTH + max_count / 2) / max_count;
    if count > 0 { len.max(1) } else { 0 }
}

fn write_statistics<W>(out: &mut W, stats: &DescriptiveStats) -> io::Result<()>
where
    W: Write,
{
    let p = STAT_DECIMALS;
    let optional = |value: Option<f64>| value.map_or("N/A".to_owned(), |v| format!("{v:.p$}"));

    writeln!(out, "  Central tendency")?;
    writeln!(out, "    {:<24} {:>14.p$}", "Mean", stats.mean)?;
    writeln!(out, "    {:<24} {:>14.p$}", "Median", stats.median)?;
    writeln!(out, "    {:<24} {:>14}", "Mode", format_values(&stats.mode, p))?;
    writeln!(out, "  Dispersion")?;
    writeln!(out, "    {:<24} {:>14.p$}", "Variance (population)", stats.variance)?;
    writeln!(out, "    {:<24} {:>14.p$}", "Std dev (population)", stats.std_dev)?;
    writeln!(
        out,
        "    {:<24} {:>14}",
        "Variance (sample)",
        optional(stats.sample_variance)
    )?;
    writeln!(
        out,
        "    {:<24} {:>14}",
        "Std dev (sample)",
        optional(stats.sample_std_dev)
    )?;
    writeln!(out, "    {:<24} {:>14.p$}", "Range", stats.range)?;
    writeln!(out, "    {:<24} {:>14.p$}", "IQR", stats.iqr)?;
    let cv = stats
        .coefficient_of_variation
        .zip(stats.dispersion_level())
        .map_or("N/A".to_owned(), |(cv, level)| format!("{cv:.2}% ({level})"));
    writeln!(out, "    {:<24} {:>14}", "Coeff. of variation", cv)?;
    writeln!(out, "  Position")?;
    writeln!(out, "    {:<24} {:>14.p$}", "Minimum", stats.min)?;
    writeln!(out, "    {:<24} {:>14.p$}", "Q1", stats.quartiles.q1)?;
    writeln!(out, "    {:<24} {:>14.p$}", "Q2", stats.quartiles.q2)?;
    writeln!(out, "    {:<24} {:>14.p$}", "Q3", stats.quartiles.q3)?;
    writeln!(out, "    {:<24} {:>14.p$}", "Maximum", stats.max)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use freqstat_stats::{
        analysis::{AnalysisConfig, AnalysisEngine},
        sample::Sample,
    };

    use super::*;

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(0, 10), 0);
        assert_eq!(bar_length(10, 10), BAR_WIDTH);
        assert_eq!(bar_length(5, 10), BAR_WIDTH / 2);
        assert_eq!(bar_length(1, 1000), 1);
        assert_eq!(bar_length(0, 0), 0);
    }

    #[test]
    fn test_report_mentions_every_class() {
        let sample = Sample::new((1..=10).map(f64::from)).unwrap();
        let analysis = AnalysisEngine::new(AnalysisConfig::default())
            .run(&sample)
            .unwrap();
        let ctx = ReportContext {
            attribute: "score",
            total_records: 12,
            analysis: &analysis,
        };
        let mut buf = vec![];
        write_report(&mut buf, &ctx).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Frequency Analysis: 'score' (12 records, 10 observations)"));
        assert!(text.contains("[1, 3)"));
        assert!(text.contains("[9, 10]"));
        assert!(text.contains("C5"));
        assert!(text.contains("none"));
        assert!(text.contains("modal class: [1, 3) (2 observations)"));
    }
}
