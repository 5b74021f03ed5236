use std::{panic, thread};

use crate::{
    descriptive::DescriptiveStats,
    error::StatsError,
    frequency::{FrequencyDistributionBuilder, FrequencyTable},
    sample::Sample,
};

/// Tunables for an analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisConfig {
    /// Explicit class count; Sturges' rule when `None`.
    #[serde(default)]
    pub num_classes: Option<usize>,
    /// Compute the frequency table and the statistics on separate threads.
    #[serde(default)]
    pub parallel: bool,
}

/// Combined result of one analysis run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Analysis {
    pub table: FrequencyTable,
    pub stats: DescriptiveStats,
}

/// Runs the frequency distribution and descriptive statistics over a sample.
///
/// The engine holds no state between runs; each call to [`run`](Self::run)
/// either returns a complete [`Analysis`] or the first error encountered.
///
/// # Examples
///
/// ```
/// use freqstat_stats::{
///     analysis::{AnalysisConfig, AnalysisEngine},
///     sample::Sample,
/// };
///
/// let sample = Sample::new([2.0, 4.0, 4.0, 5.0, 7.0, 9.0]).unwrap();
/// let engine = AnalysisEngine::new(AnalysisConfig::default());
/// let analysis = engine.run(&sample).unwrap();
///
/// assert_eq!(analysis.stats.mode, vec![4.0]);
/// assert_eq!(analysis.table.sample_size(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    builder: FrequencyDistributionBuilder,
}

impl AnalysisEngine {
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            builder: FrequencyDistributionBuilder::new().with_num_classes(config.num_classes),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validates the sample and configuration, then runs both calculators.
    ///
    /// # Errors
    ///
    /// Propagates [`StatsError`] unchanged from validation or either calculator.
    pub fn run(&self, sample: &Sample) -> Result<Analysis, StatsError> {
        self.builder.validate()?;
        sample.ensure_not_empty()?;

        let (table, stats) = if self.config.parallel {
            self.run_parallel(sample)
        } else {
            (self.builder.build(sample), DescriptiveStats::compute(sample))
        };
        let analysis = Analysis {
            table: table?,
            stats: stats?,
        };

        log::debug!(
            "analysis complete: n={}, classes={}",
            sample.len(),
            analysis.table.len()
        );
        Ok(analysis)
    }

    fn run_parallel(
        &self,
        sample: &Sample,
    ) -> (
        Result<FrequencyTable, StatsError>,
        Result<DescriptiveStats, StatsError>,
    ) {
        thread::scope(|s| {
            let table = s.spawn(|| self.builder.build(sample));
            let stats = s.spawn(|| DescriptiveStats::compute(sample));
            (
                table.join().unwrap_or_else(|e| panic::resume_unwind(e)),
                stats.join().unwrap_or_else(|e| panic::resume_unwind(e)),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(num_classes: Option<usize>, parallel: bool) -> AnalysisEngine {
        AnalysisEngine::new(AnalysisConfig {
            num_classes,
            parallel,
        })
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sample = Sample::new((0..250).map(|i| f64::from(i * 37 % 101) / 4.0)).unwrap();
        let sequential = engine(None, false).run(&sample).unwrap();
        let parallel = engine(None, true).run(&sample).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_empty_sample_propagates_insufficient_data() {
        let sample = Sample::new([]).unwrap();
        assert_eq!(
            engine(None, false).run(&sample),
            Err(StatsError::InsufficientData)
        );
        assert_eq!(
            engine(None, true).run(&sample),
            Err(StatsError::InsufficientData)
        );
    }

    #[test]
    fn test_invalid_class_count_fails_whole_run() {
        let sample = Sample::new([1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            engine(Some(0), true).run(&sample),
            Err(StatsError::InvalidClassCount { requested: 0 })
        );
    }

    #[test]
    fn test_results_are_consistent() {
        let sample = Sample::new((1..=100).map(f64::from)).unwrap();
        let analysis = engine(None, false).run(&sample).unwrap();
        assert_eq!(analysis.table.len(), 8);
        assert_eq!(analysis.table.sample_size(), analysis.stats.count);
        assert_eq!(
            analysis.table.rows()[0].interval.lower,
            analysis.stats.min
        );
        assert_eq!(
            analysis.table.rows().last().unwrap().interval.upper,
            analysis.stats.max
        );
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"num_classes": 6, "parallel": true}"#).unwrap();
        assert_eq!(config.num_classes, Some(6));
        assert!(config.parallel);
    }
}
