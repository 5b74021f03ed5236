use chrono::{DateTime, Utc};
use freqstat_stats::{
    analysis::{Analysis, AnalysisConfig},
    descriptive::DescriptiveStats,
    frequency::FrequencyTable,
};
use serde::Serialize;

/// Machine-readable record of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    /// Timestamp when the report was generated (ISO 8601 format)
    pub generated_at: DateTime<Utc>,
    /// Input file the attribute was read from
    pub source: String,
    /// Name of the analyzed attribute
    pub attribute: &'a str,
    /// Records in the source, including those with a missing value
    pub total_records: usize,
    /// Observations that entered the analysis
    pub sample_size: usize,
    /// Settings the analysis ran with
    pub config: AnalysisConfig,
    pub table: &'a FrequencyTable,
    pub stats: &'a DescriptiveStats,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(
        source: String,
        attribute: &'a str,
        total_records: usize,
        config: AnalysisConfig,
        analysis: &'a Analysis,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            source,
            attribute,
            total_records,
            sample_size: analysis.table.sample_size(),
            config,
            table: &analysis.table,
            stats: &analysis.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use freqstat_stats::{analysis::AnalysisEngine, sample::Sample};

    use super::*;

    #[test]
    fn test_report_json_shape() {
        let config = AnalysisConfig {
            num_classes: Some(2),
            parallel: false,
        };
        let sample = Sample::new([1.0, 2.0, 3.0, 4.0]).unwrap();
        let analysis = AnalysisEngine::new(config).run(&sample).unwrap();
        let report = AnalysisReport::new("data.csv".to_owned(), "x", 5, config, &analysis);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["source"], "data.csv");
        assert_eq!(json["attribute"], "x");
        assert_eq!(json["total_records"], 5);
        assert_eq!(json["sample_size"], 4);
        assert_eq!(json["config"]["num_classes"], 2);
        assert_eq!(json["stats"]["mean"], 2.5);
        assert!(json["generated_at"].is_string());
    }
}
