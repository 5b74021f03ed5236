//! Frequency table export as CSV

use std::{fs::File, io, path::Path};

use anyhow::Context;
use freqstat_stats::frequency::FrequencyTable;

const HEADER: [&str; 10] = [
    "Interval",
    "Lower bound",
    "Upper bound",
    "Class mark",
    "Absolute frequency (fi)",
    "Relative frequency (hi)",
    "Percentage (%)",
    "Cumulative frequency (Fi)",
    "Cumulative relative (Hi)",
    "Cumulative percentage (F%)",
];

/// Writes the table to `path`, creating or truncating the file.
pub fn save(table: &FrequencyTable, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create frequency table: {}", path.display()))?;
    write(table, file)
        .with_context(|| format!("Failed to write frequency table: {}", path.display()))
}

/// Writes the table as CSV; floating-point columns use four decimals.
pub fn write<W>(table: &FrequencyTable, writer: W) -> Result<(), csv::Error>
where
    W: io::Write,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;
    for row in table.rows() {
        writer.write_record([
            table.interval_label(&row.interval),
            format!("{:.4}", row.interval.lower),
            format!("{:.4}", row.interval.upper),
            format!("{:.4}", row.class_mark),
            row.absolute.to_string(),
            format!("{:.4}", row.relative),
            format!("{:.4}", row.percentage),
            row.cumulative_absolute.to_string(),
            format!("{:.4}", row.cumulative_relative),
            format!("{:.4}", row.cumulative_percentage),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use freqstat_stats::{frequency::FrequencyDistributionBuilder, sample::Sample};

    use super::*;

    #[test]
    fn test_writes_header_and_rows() {
        let sample = Sample::new([1.0, 2.0, 2.0, 4.0]).unwrap();
        let table = FrequencyDistributionBuilder::new()
            .with_num_classes(Some(3))
            .build(&sample)
            .unwrap();

        let mut buf = vec![];
        write(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 1 + table.len());
        assert!(lines[0].starts_with("Interval,Lower bound,Upper bound"));
        assert_eq!(
            lines[1],
            "\"[1, 2)\",1.0000,2.0000,1.5000,1,0.2500,25.0000,1,0.2500,25.0000"
        );
        assert!(lines[3].ends_with("100.0000"));
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frequency_table.csv");
        let sample = Sample::new([3.0, 3.0]).unwrap();
        let table = FrequencyDistributionBuilder::new().build(&sample).unwrap();
        save(&table, &path).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\"[3, 3]\""));
    }
}
