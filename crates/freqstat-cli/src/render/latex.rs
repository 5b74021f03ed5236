//! LaTeX report document
//!
//! Produces a standalone `article` with the frequency tables, the
//! descriptive statistics, `pgfplots` charts (histogram, frequency polygon,
//! ogive, bar chart), a `pgf-pie` percentage chart and a short conclusion.
//! Compiling it to PDF is left to the user's LaTeX toolchain.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use freqstat_stats::{
    descriptive::DescriptiveStats,
    frequency::{FrequencyRow, FrequencyTable},
};

use super::{ReportContext, format_values};

/// Classes shown as their own slice in the percentage chart.
const PIE_TOP_CLASSES: usize = 5;

pub fn save(ctx: &ReportContext<'_>, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create LaTeX document: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_document(&mut writer, ctx)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to write LaTeX document: {}", path.display()))
}

pub fn write_document<W>(out: &mut W, ctx: &ReportContext<'_>) -> io::Result<()>
where
    W: Write,
{
    let attribute = escape(ctx.attribute);
    let table = &ctx.analysis.table;
    let stats = &ctx.analysis.stats;

    write_preamble(out)?;
    writeln!(out, r"\begin{{document}}")?;
    writeln!(out, r"\maketitle")?;
    writeln!(out, r"\tableofcontents")?;
    writeln!(out, r"\newpage")?;
    writeln!(out)?;

    writeln!(out, r"\section{{Introduction}}")?;
    writeln!(
        out,
        "This document presents a statistical analysis of the attribute \\textbf{{{attribute}}}. \
         The source holds {} records, of which {} have a value. The analysis covers the \
         frequency distribution, the measures of central tendency and dispersion, and \
         several charts.",
        ctx.total_records,
        table.sample_size()
    )?;
    writeln!(out)?;

    write_frequency_tables(out, table)?;
    write_statistics(out, stats)?;
    write_charts(out, table)?;
    write_conclusions(out, &attribute, table, stats)?;

    writeln!(out, r"\end{{document}}")?;
    Ok(())
}

fn write_preamble<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, r"\documentclass[11pt]{{article}}")?;
    writeln!(out, r"\usepackage[margin=2cm,top=2.5cm]{{geometry}}")?;
    writeln!(out, r"\usepackage{{float}}")?;
    writeln!(out, r"\usepackage{{booktabs}}")?;
    writeln!(out, r"\usepackage{{amsmath}}")?;
    writeln!(out, r"\usepackage{{pgfplots}}")?;
    writeln!(out, r"\usepackage{{pgf-pie}}")?;
    writeln!(out, r"\pgfplotsset{{compat=1.17}}")?;
    writeln!(out, r"\title{{Statistical Analysis Report}}")?;
    writeln!(out, r"\author{{freqstat}}")?;
    writeln!(out, r"\date{{\today}}")?;
    Ok(())
}

fn write_frequency_tables<W>(out: &mut W, table: &FrequencyTable) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, r"\section{{Frequency Table}}")?;
    writeln!(
        out,
        "Class intervals follow Sturges' rule unless a class count was given. \
         Every interval is closed on the left and open on the right, except the last one, \
         which also includes the maximum."
    )?;
    writeln!(out, r"\begin{{table}}[H]")?;
    writeln!(out, r"\centering")?;
    writeln!(out, r"\caption{{Frequency distribution}}")?;
    writeln!(out, r"\begin{{tabular}}{{ccccc}}")?;
    writeln!(out, r"\toprule")?;
    writeln!(out, r"Interval & Class mark & $f_i$ & $h_i$ & \% \\")?;
    writeln!(out, r"\midrule")?;
    for row in table.rows() {
        writeln!(
            out,
            r"{{{}}} & {} & {} & {:.4} & {:.2} \\",
            table.interval_label(&row.interval),
            table.class_mark_label(row.class_mark),
            row.absolute,
            row.relative,
            row.percentage,
        )?;
    }
    writeln!(out, r"\bottomrule")?;
    writeln!(out, r"\end{{tabular}}")?;
    writeln!(out, r"\end{{table}}")?;
    writeln!(out)?;

    writeln!(out, r"\begin{{table}}[H]")?;
    writeln!(out, r"\centering")?;
    writeln!(out, r"\caption{{Cumulative frequencies}}")?;
    writeln!(out, r"\begin{{tabular}}{{cccc}}")?;
    writeln!(out, r"\toprule")?;
    writeln!(out, r"Interval & $F_i$ & $H_i$ & $F_i$ \% \\")?;
    writeln!(out, r"\midrule")?;
    for row in table.rows() {
        writeln!(
            out,
            r"{{{}}} & {} & {:.4} & {:.2} \\",
            table.interval_label(&row.interval),
            row.cumulative_absolute,
            row.cumulative_relative,
            row.cumulative_percentage,
        )?;
    }
    writeln!(out, r"\bottomrule")?;
    writeln!(out, r"\end{{tabular}}")?;
    writeln!(out, r"\end{{table}}")?;
    if let Some(notice) = table.degenerate_range() {
        writeln!(out, r"\noindent\textit{{Note: {}.}}", escape(&notice.to_string()))?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_statistics<W>(out: &mut W, stats: &DescriptiveStats) -> io::Result<()>
where
    W: Write,
{
    let optional =
        |value: Option<f64>| value.map_or(r"\text{n/a}".to_owned(), |v| format!("{v:.4}"));

    writeln!(out, r"\section{{Descriptive Statistics}}")?;
    writeln!(
        out,
        "Variance and standard deviation are population measures (divided by $n$); \
         quartiles are interpolated linearly between order statistics."
    )?;

    writeln!(out, r"\subsection{{Central Tendency}}")?;
    writeln!(out, r"\begin{{itemize}}")?;
    writeln!(out, r"\item Arithmetic mean: $\bar{{x}} = {:.4}$", stats.mean)?;
    writeln!(out, r"\item Median: $Me = {:.4}$", stats.median)?;
    writeln!(
        out,
        r"\item Mode: $Mo = \{{{}\}}$",
        format_values(&stats.mode, 4).replace("none", r"\emptyset")
    )?;
    writeln!(out, r"\end{{itemize}}")?;

    writeln!(out, r"\subsection{{Dispersion}}")?;
    writeln!(out, r"\begin{{itemize}}")?;
    writeln!(out, r"\item Standard deviation: $\sigma = {:.4}$", stats.std_dev)?;
    writeln!(out, r"\item Variance: $\sigma^2 = {:.4}$", stats.variance)?;
    writeln!(
        out,
        r"\item Sample standard deviation: $s = {}$",
        optional(stats.sample_std_dev)
    )?;
    writeln!(
        out,
        r"\item Sample variance: $s^2 = {}$",
        optional(stats.sample_variance)
    )?;
    writeln!(out, r"\item Range: $R = {:.4}$", stats.range)?;
    writeln!(out, r"\item Interquartile range: $IQR = {:.4}$", stats.iqr)?;
    writeln!(out, r"\end{{itemize}}")?;

    writeln!(out, r"\subsection{{Extremes and Quartiles}}")?;
    writeln!(out, r"\begin{{itemize}}")?;
    writeln!(out, r"\item Minimum: ${:.4}$", stats.min)?;
    writeln!(out, r"\item First quartile (Q1): ${:.4}$", stats.quartiles.q1)?;
    writeln!(out, r"\item Second quartile (Q2): ${:.4}$", stats.quartiles.q2)?;
    writeln!(out, r"\item Third quartile (Q3): ${:.4}$", stats.quartiles.q3)?;
    writeln!(out, r"\item Maximum: ${:.4}$", stats.max)?;
    writeln!(out, r"\end{{itemize}}")?;
    writeln!(out)?;
    Ok(())
}

fn write_charts<W>(out: &mut W, table: &FrequencyTable) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, r"\section{{Charts}}")?;

    writeln!(out, r"\subsection{{Histogram}}")?;
    let histogram = if table.degenerate_range().is_some() {
        let coords = table
            .rows()
            .iter()
            .map(|r| format!("({}, {})", r.class_mark, r.absolute))
            .collect::<String>();
        format!(r"\addplot[ybar, fill=blue!30] coordinates {{{coords}}};")
    } else {
        let mut coords = table
            .rows()
            .iter()
            .map(|r| format!("({}, {})", r.interval.lower, r.absolute))
            .collect::<String>();
        if let Some(last) = table.rows().last() {
            coords.push_str(&format!("({}, {})", last.interval.upper, last.absolute));
        }
        format!(r"\addplot[ybar interval, fill=blue!30] coordinates {{{coords}}};")
    };
    write_figure(
        out,
        "Histogram of absolute frequencies",
        "xlabel={Class intervals}, ylabel={Absolute frequency}, ymin=0",
        &histogram,
    )?;

    writeln!(out, r"\subsection{{Frequency Polygon}}")?;
    let coords = table
        .rows()
        .iter()
        .map(|r| format!("({}, {})", r.class_mark, r.absolute))
        .collect::<String>();
    write_figure(
        out,
        "Frequency polygon",
        "xlabel={Class mark}, ylabel={Absolute frequency}, ymin=0",
        &format!(r"\addplot[mark=*, thick] coordinates {{{coords}}};"),
    )?;

    writeln!(out, r"\subsection{{Ogive}}")?;
    let start = table
        .rows()
        .first()
        .map(|r| format!("({}, 0)", r.interval.lower))
        .unwrap_or_default();
    let coords = table
        .rows()
        .iter()
        .map(|r| format!("({}, {})", r.interval.upper, r.cumulative_absolute))
        .collect::<String>();
    write_figure(
        out,
        "Ogive (cumulative frequencies)",
        "xlabel={Upper class bound}, ylabel={Cumulative frequency}, ymin=0",
        &format!(r"\addplot[mark=*, thick, orange] coordinates {{{start}{coords}}};"),
    )?;

    writeln!(out, r"\subsection{{Bar Chart}}")?;
    let labels = (1..=table.len())
        .map(|i| format!("C{i}"))
        .collect::<Vec<_>>();
    let coords = table
        .rows()
        .iter()
        .zip(&labels)
        .map(|(r, label)| format!("({label}, {})", r.absolute))
        .collect::<String>();
    let options = format!(
        "ybar, symbolic x coords={{{}}}, xtick=data, nodes near coords, ymin=0, \
         xlabel={{Classes}}, ylabel={{Absolute frequency}}",
        labels.join(",")
    );
    write_figure(
        out,
        "Bar chart of absolute frequencies",
        &options,
        &format!(r"\addplot[fill=teal!40] coordinates {{{coords}}};"),
    )?;

    writeln!(out, r"\subsection{{Percentage Distribution}}")?;
    let slices = pie_slices(table)
        .iter()
        .filter(|slice| slice.percentage > 0.0)
        .map(|slice| format!("{:.1}/{{{}}}", slice.percentage, slice.label))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, r"\begin{{figure}}[H]")?;
    writeln!(out, r"\centering")?;
    writeln!(out, r"\begin{{tikzpicture}}")?;
    writeln!(
        out,
        r"\pie[text=legend, sum=auto, after number=\%, radius=3]{{{slices}}}"
    )?;
    writeln!(out, r"\end{{tikzpicture}}")?;
    writeln!(out, r"\caption{{Percentage distribution}}")?;
    writeln!(out, r"\end{{figure}}")?;
    writeln!(out)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
struct PieSlice {
    label: String,
    percentage: f64,
}

/// The most frequent classes (first on ties), largest first, with the rest
/// merged into one "Others" slice. Tables with no leftover keep every class
/// in interval order.
#[expect(clippy::cast_precision_loss)]
fn pie_slices(table: &FrequencyTable) -> Vec<PieSlice> {
    let slice = |row: &FrequencyRow| PieSlice {
        label: table.interval_label(&row.interval),
        percentage: row.percentage,
    };

    let mut ranked = table.rows().iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.absolute.cmp(&a.absolute));
    ranked.truncate(PIE_TOP_CLASSES);
    let others = table.sample_size() - ranked.iter().map(|r| r.absolute).sum::<usize>();
    if others == 0 {
        return table.rows().iter().map(slice).collect();
    }

    let mut slices = ranked.into_iter().map(slice).collect::<Vec<_>>();
    slices.push(PieSlice {
        label: "Others".to_owned(),
        percentage: others as f64 / table.sample_size() as f64 * 100.0,
    });
    slices
}

fn write_figure<W>(out: &mut W, caption: &str, axis_options: &str, plot: &str) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, r"\begin{{figure}}[H]")?;
    writeln!(out, r"\centering")?;
    writeln!(out, r"\begin{{tikzpicture}}")?;
    writeln!(out, r"\begin{{axis}}[width=0.8\textwidth, {axis_options}]")?;
    writeln!(out, "{plot}")?;
    writeln!(out, r"\end{{axis}}")?;
    writeln!(out, r"\end{{tikzpicture}}")?;
    writeln!(out, r"\caption{{{caption}}}")?;
    writeln!(out, r"\end{{figure}}")?;
    Ok(())
}

fn write_conclusions<W>(
    out: &mut W,
    attribute: &str,
    table: &FrequencyTable,
    stats: &DescriptiveStats,
) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, r"\section{{Conclusions}}")?;
    writeln!(
        out,
        r"The analysis of the attribute \textbf{{{attribute}}} shows the following:"
    )?;
    writeln!(out, r"\begin{{enumerate}}")?;
    writeln!(
        out,
        r"\item The distribution has a mean of {:.2} and a standard deviation of {:.2}.",
        stats.mean, stats.std_dev
    )?;
    writeln!(
        out,
        r"\item Values range from {:.2} to {:.2}, a range of {:.2}.",
        stats.min, stats.max, stats.range
    )?;
    if let Some(modal) = table.modal_class() {
        writeln!(
            out,
            r"\item The modal class is {} with {} observations ({:.2}\%).",
            table.interval_label(&modal.interval),
            modal.absolute,
            modal.percentage
        )?;
    }
    match stats.coefficient_of_variation.zip(stats.dispersion_level()) {
        Some((cv, level)) => writeln!(
            out,
            r"\item The coefficient of variation is {cv:.2}\%, which indicates {level} relative dispersion."
        )?,
        None => writeln!(
            out,
            r"\item The coefficient of variation is undefined because the mean is zero."
        )?,
    }
    writeln!(out, r"\end{{enumerate}}")?;
    writeln!(out)?;
    Ok(())
}

/// Escapes LaTeX special characters in plain text.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
