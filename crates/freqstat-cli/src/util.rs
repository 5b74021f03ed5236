use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use freqstat_stats::analysis::AnalysisConfig;

/// Destination for a generated JSON document.
#[derive(Debug, derive_more::Display)]
enum Output {
    #[display("stdout")]
    Stdout(StdoutLock<'static>),
    #[display("{}", path.display())]
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Writes `value` as pretty-printed JSON to `path`, or to stdout when `None`.
pub fn save_json<T>(value: &T, path: Option<PathBuf>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut output = match path {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Output::File {
                writer: BufWriter::new(file),
                path,
            }
        }
        None => Output::Stdout(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut output, value)
        .with_context(|| format!("Failed to write JSON to {output}"))?;
    writeln!(output)
        .and_then(|()| output.flush())
        .with_context(|| format!("Failed to flush JSON to {output}"))
}

/// Read analysis settings from a JSON file
///
/// Missing keys fall back to [`AnalysisConfig::default`].
pub fn read_config_file<P>(path: P) -> anyhow::Result<AnalysisConfig>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;
    serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Create the output directory (and parents) if it does not exist yet
pub fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "num_classes": 4 }"#).unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.num_classes, Some(4));
        assert!(!config.parallel);
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let err = read_config_file("/nonexistent/freqstat.json").unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }

    #[test]
    fn test_save_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_json(&vec![1, 2, 3], Some(path.clone())).unwrap();
        let written: Vec<i32> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }
}
