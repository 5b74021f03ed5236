//! Reading the analyzed attribute from a data file
//!
//! CSV files are read with a header row; the analyzed column is either named
//! explicitly or the first column whose non-missing cells are all numbers.
//! JSON files hold a single array of numbers (`null` entries are missing).

use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use freqstat_stats::{error::StatsError, sample::Sample};

/// Cell spellings treated as missing values (compared case-insensitively).
const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("no numeric column found (columns: {})", columns.join(", "))]
    NoNumericColumn { columns: Vec<String> },
    #[display("column '{name}' not found")]
    ColumnNotFound { name: String },
    #[display("column '{name}' is not numeric: row {row} holds '{cell}'")]
    NonNumericColumn {
        name: String,
        row: usize,
        cell: String,
    },
    #[display("invalid CSV data: {_0}")]
    Csv(csv::Error),
    #[display("invalid JSON data: {_0}")]
    Json(serde_json::Error),
    #[display("failed to read input: {_0}")]
    Io(io::Error),
    #[display("invalid sample: {_0}")]
    Sample(StatsError),
}

/// The selected attribute, ready for analysis.
#[derive(Debug, Clone)]
pub struct LoadedColumn {
    /// Attribute name (CSV header, or the file stem for JSON input).
    pub name: String,
    /// Numeric observations with missing values removed.
    pub sample: Sample,
    /// Number of records in the source, including those with a missing value.
    pub total_records: usize,
}

/// Summary of one CSV column, as listed by the `columns` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name: String,
    pub numeric: bool,
    pub present: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Guesses the format from the file extension; anything but `.json` is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Loads the analyzed attribute from `path`.
pub fn load(path: &Path, column: Option<&str>) -> Result<LoadedColumn, LoadError> {
    let reader = BufReader::new(File::open(path).map_err(LoadError::Io)?);
    match InputFormat::from_path(path) {
        InputFormat::Csv => from_csv_reader(reader, column),
        InputFormat::Json => {
            let name = column
                .map(str::to_owned)
                .or_else(|| {
                    path.file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                })
                .unwrap_or_else(|| "value".to_owned());
            from_json_reader(reader, name)
        }
    }
}

/// Reads a CSV document and extracts one numeric column.
pub fn from_csv_reader<R>(reader: R, column: Option<&str>) -> Result<LoadedColumn, LoadError>
where
    R: io::Read,
{
    let (headers, records) = read_csv(reader)?;

    let index = match column {
        Some(name) => headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::ColumnNotFound {
                name: name.to_owned(),
            })?,
        None => (0..headers.len())
            .find(|&i| parse_column(&records, i).is_ok_and(|values| !values.is_empty()))
            .ok_or_else(|| LoadError::NoNumericColumn {
                columns: headers.clone(),
            })?,
    };

    let name = headers[index].clone();
    let values = parse_column(&records, index).map_err(|(row, cell)| {
        LoadError::NonNumericColumn {
            name: name.clone(),
            row,
            cell,
        }
    })?;
    let sample = Sample::new(values).map_err(LoadError::Sample)?;

    Ok(LoadedColumn {
        name,
        sample,
        total_records: records.len(),
    })
}

/// Reads a JSON array of numbers; `null` entries count as missing.
pub fn from_json_reader<R>(reader: R, name: String) -> Result<LoadedColumn, LoadError>
where
    R: io::Read,
{
    let raw: Vec<Option<f64>> = serde_json::from_reader(reader).map_err(LoadError::Json)?;
    let total_records = raw.len();
    let sample = Sample::new(raw.into_iter().flatten()).map_err(LoadError::Sample)?;
    Ok(LoadedColumn {
        name,
        sample,
        total_records,
    })
}

/// Describes every column of a CSV document.
pub fn describe_csv_columns<R>(reader: R) -> Result<Vec<ColumnSummary>, LoadError>
where
    R: io::Read,
{
    let (headers, records) = read_csv(reader)?;
    let summaries = headers
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let missing = records
                .iter()
                .filter(|record| is_missing(record.get(i).unwrap_or("")))
                .count();
            let numeric = parse_column(&records, i).is_ok_and(|values| !values.is_empty());
            ColumnSummary {
                name,
                numeric,
                present: records.len() - missing,
                missing,
            }
        })
        .collect();
    Ok(summaries)
}

fn read_csv<R>(reader: R) -> Result<(Vec<String>, Vec<csv::StringRecord>), LoadError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader
        .headers()
        .map_err(LoadError::Csv)?
        .iter()
        .map(str::to_owned)
        .collect();
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(LoadError::Csv)?;
    Ok((headers, records))
}

/// Parses the non-missing cells of a column.
///
/// On failure returns the 1-based data row and the offending cell.
fn parse_column(records: &[csv::StringRecord], index: usize) -> Result<Vec<f64>, (usize, String)> {
    let mut values = vec![];
    for (row, record) in records.iter().enumerate() {
        let cell = record.get(index).unwrap_or("");
        if is_missing(cell) {
            continue;
        }
        match cell.parse::<f64>() {
            Ok(value) if value.is_finite() => values.push(value),
            _ => return Err((row + 1, cell.to_owned())),
        }
    }
    Ok(values)
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    MISSING_MARKERS
        .iter()
        .any(|marker| cell.eq_ignore_ascii_case(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
name,age,height
ana,34,1.62
ben,,1.80
cleo,29,NA
dan,41,1.75
";

    #[test]
    fn test_selects_first_numeric_column() {
        let column = from_csv_reader(CSV.as_bytes(), None).unwrap();
        assert_eq!(column.name, "age");
        assert_eq!(column.sample.values(), &[34.0, 29.0, 41.0]);
        assert_eq!(column.total_records, 4);
    }

    #[test]
    fn test_selects_named_column() {
        let column = from_csv_reader(CSV.as_bytes(), Some("height")).unwrap();
        assert_eq!(column.sample.values(), &[1.62, 1.80, 1.75]);
    }

    #[test]
    fn test_unknown_column() {
        let err = from_csv_reader(CSV.as_bytes(), Some("weight")).unwrap_err();
        assert!(matches!(err, LoadError::ColumnNotFound { name } if name == "weight"));
    }

    #[test]
    fn test_non_numeric_column() {
        let err = from_csv_reader(CSV.as_bytes(), Some("name")).unwrap_err();
        match err {
            LoadError::NonNumericColumn { name, row, cell } => {
                assert_eq!(name, "name");
                assert_eq!(row, 1);
                assert_eq!(cell, "ana");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_numeric_column() {
        let err = from_csv_reader("a,b\nx,y\n".as_bytes(), None).unwrap_err();
        assert_eq!(err.to_string(), "no numeric column found (columns: a, b)");
    }

    #[test]
    fn test_all_missing_column_is_not_auto_selected() {
        let err = from_csv_reader("a,b\n,x\nNA,y\n".as_bytes(), None).unwrap_err();
        assert!(matches!(err, LoadError::NoNumericColumn { .. }));
    }

    #[test]
    fn test_infinite_cells_are_not_numeric() {
        let err = from_csv_reader("v\n1\ninf\n".as_bytes(), Some("v")).unwrap_err();
        assert!(matches!(err, LoadError::NonNumericColumn { row: 2, .. }));
    }

    #[test]
    fn test_json_array_with_nulls() {
        let column = from_json_reader("[1.5, null, 2, 3]".as_bytes(), "x".to_owned()).unwrap();
        assert_eq!(column.sample.values(), &[1.5, 2.0, 3.0]);
        assert_eq!(column.total_records, 4);
    }

    #[test]
    fn test_json_rejects_objects() {
        let err = from_json_reader(r#"{"a": 1}"#.as_bytes(), "x".to_owned()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_describe_columns() {
        let summaries = describe_csv_columns(CSV.as_bytes()).unwrap();
        assert_eq!(
            summaries,
            vec![
                ColumnSummary {
                    name: "name".to_owned(),
                    numeric: false,
                    present: 4,
                    missing: 0,
                },
                ColumnSummary {
                    name: "age".to_owned(),
                    numeric: true,
                    present: 3,
                    missing: 1,
                },
                ColumnSummary {
                    name: "height".to_owned(),
                    numeric: true,
                    present: 3,
                    missing: 1,
                },
            ]
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("data")), InputFormat::Csv);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "[4, 8, 15]").unwrap();
        let column = load(&path, None).unwrap();
        assert_eq!(column.name, "scores");
        assert_eq!(column.sample.len(), 3);
    }
}
