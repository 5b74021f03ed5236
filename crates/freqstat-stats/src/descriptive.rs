use crate::{error::StatsError, quantile::Quartiles, sample::Sample};

/// Descriptive statistics summarizing a sample.
///
/// This structure contains measures of central tendency, dispersion and
/// position. Variance and standard deviation use **population** semantics
/// (divide by `n`); the sample (`n - 1`) variants are offered separately and
/// only exist when `n > 1`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DescriptiveStats {
    /// Number of observations.
    pub count: usize,
    /// The arithmetic mean of the sample.
    pub mean: f64,
    /// The median value of the sample.
    pub median: f64,
    /// Values sharing the highest occurrence count, in ascending order.
    ///
    /// Empty when every value occurs exactly once.
    pub mode: Vec<f64>,
    /// Population variance (sum of squared deviations divided by `n`).
    pub variance: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Sample variance (divided by `n - 1`); `None` when `n == 1`.
    pub sample_variance: Option<f64>,
    /// Sample standard deviation; `None` when `n == 1`.
    pub sample_std_dev: Option<f64>,
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// `max - min`.
    pub range: f64,
    /// Quartiles by linear interpolation.
    pub quartiles: Quartiles,
    /// Interquartile range, `q3 - q1`.
    pub iqr: f64,
    /// Standard deviation as a percentage of `|mean|`; `None` when the mean is zero.
    pub coefficient_of_variation: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics for a sample.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InsufficientData`] if the sample is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqstat_stats::{descriptive::DescriptiveStats, sample::Sample};
    ///
    /// let sample = Sample::new((1..=10).map(f64::from)).unwrap();
    /// let stats = DescriptiveStats::compute(&sample).unwrap();
    /// assert_eq!(stats.mean, 5.5);
    /// assert_eq!(stats.median, 5.5);
    /// assert_eq!(stats.variance, 8.25);
    /// assert_eq!(stats.range, 9.0);
    /// assert!(stats.mode.is_empty());
    /// ```
    pub fn compute(sample: &Sample) -> Result<Self, StatsError> {
        sample.ensure_not_empty()?;
        let stats = Self::from_sorted(sample.sorted()).ok_or(StatsError::InsufficientData)?;
        Ok(stats)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Returns `None` if the dataset is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqstat_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[1.0, 1.0, 2.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(stats.mode, vec![1.0, 2.0]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let sum = sorted_values.iter().sum::<f64>();
        let mean = if sum.is_finite() {
            sum / n
        } else {
            sorted_values.iter().map(|v| v / n).sum()
        };
        let median = median(sorted_values);
        let spread = Spread::new(sorted_values, mean);
        let (variance, std_dev) = spread.divided_by(n);
        let sample = (count > 1).then(|| spread.divided_by(n - 1.0));
        let quartiles = Quartiles::from_sorted(sorted_values)?;
        let coefficient_of_variation = (mean != 0.0).then(|| std_dev / mean.abs() * 100.0);

        Some(Self {
            count,
            mean,
            median,
            mode: modes(sorted_values),
            variance,
            std_dev,
            sample_variance: sample.map(|(variance, _)| variance),
            sample_std_dev: sample.map(|(_, std_dev)| std_dev),
            min,
            max,
            range: max - min,
            quartiles,
            iqr: quartiles.iqr(),
            coefficient_of_variation,
        })
    }

    /// Classifies the relative dispersion of the sample.
    ///
    /// Returns `None` when the coefficient of variation is undefined.
    #[must_use]
    pub fn dispersion_level(&self) -> Option<DispersionLevel> {
        self.coefficient_of_variation.map(DispersionLevel::classify)
    }
}

/// Qualitative reading of a coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, derive_more::Display)]
pub enum DispersionLevel {
    /// Below 20 %.
    #[display("low")]
    Low,
    /// From 20 % up to (but excluding) 40 %.
    #[display("moderate")]
    Moderate,
    /// 40 % or more.
    #[display("high")]
    High,
}

impl DispersionLevel {
    /// Maps a coefficient of variation (in percent) to a level.
    ///
    /// ```
    /// # use freqstat_stats::descriptive::DispersionLevel;
    /// assert_eq!(DispersionLevel::classify(12.0), DispersionLevel::Low);
    /// assert_eq!(DispersionLevel::classify(20.0), DispersionLevel::Moderate);
    /// assert_eq!(DispersionLevel::classify(55.0), DispersionLevel::High);
    /// ```
    #[must_use]
    pub fn classify(coefficient_of_variation: f64) -> Self {
        if coefficient_of_variation < 20.0 {
            Self::Low
        } else if coefficient_of_variation < 40.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

fn median(sorted_values: &[f64]) -> f64 {
    let mid = sorted_values.len() / 2;
    if sorted_values.len() % 2 == 1 {
        sorted_values[mid]
    } else {
        sorted_values[mid - 1] / 2.0 + sorted_values[mid] / 2.0
    }
}

/// Sum of squared deviations from the mean.
///
/// When the deviations overflow `f64`, the sum is kept relative to the
/// largest magnitude so the standard deviation stays representable; the
/// variance then saturates to infinity.
struct Spread {
    squared_deviations: f64,
    /// Set when `squared_deviations` is relative to this magnitude.
    scale: Option<f64>,
}

impl Spread {
    fn new(sorted_values: &[f64], mean: f64) -> Self {
        let squared_deviations = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>();
        if squared_deviations.is_finite() {
            return Self {
                squared_deviations,
                scale: None,
            };
        }
        let scale = sorted_values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        Self {
            squared_deviations: sorted_values
                .iter()
                .map(|v| (v / scale - mean / scale).powi(2))
                .sum(),
            scale: Some(scale),
        }
    }

    /// `(variance, standard deviation)` for the given divisor.
    fn divided_by(&self, divisor: f64) -> (f64, f64) {
        match self.scale {
            None => {
                let variance = self.squared_deviations / divisor;
                (variance, variance.sqrt())
            }
            Some(scale) => {
                let std_dev = scale * (self.squared_deviations / divisor).sqrt();
                (std_dev * std_dev, std_dev)
            }
        }
    }
}

/// Values with the highest occurrence count, or nothing if all are unique.
fn modes(sorted_values: &[f64]) -> Vec<f64> {
    // Runs of equal values are adjacent in sorted data; `==` also folds -0.0 into 0.0.
    let runs = sorted_values
        .chunk_by(|a, b| a == b)
        .map(|run| (run[0], run.len()))
        .collect::<Vec<_>>();
    let max_count = runs.iter().map(|&(_, len)| len).max().unwrap_or(0);
    if max_count <= 1 {
        return vec![];
    }
    runs.into_iter()
        .filter(|&(_, len)| len == max_count)
        .map(|(value, _)| value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(values: &[f64]) -> DescriptiveStats {
        DescriptiveStats::compute(&Sample::new(values.iter().copied()).unwrap()).unwrap()
    }

    #[test]
    fn test_one_to_ten() {
        let values = (1..=10).map(f64::from).collect::<Vec<_>>();
        let stats = compute(&values);
        assert_eq!(stats.count, 10);
        assert_eq!(stats.mean, 5.5);
        assert_eq!(stats.median, 5.5);
        assert_eq!(stats.variance, 8.25);
        assert!((stats.std_dev - 2.8723).abs() < 1e-4);
        assert_eq!(stats.range, 9.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert!((stats.sample_variance.unwrap() - 82.5 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_way_mode_tie() {
        let stats = compute(&[1.0, 1.0, 2.0, 2.0, 3.0]);
        assert_eq!(stats.mode, vec![1.0, 2.0]);
    }

    #[test]
    fn test_all_unique_has_no_mode() {
        let stats = compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(stats.mode.is_empty());
    }

    #[test]
    fn test_single_mode_regardless_of_order() {
        let stats = compute(&[4.0, 9.0, 4.0, 1.0, 4.0, 9.0]);
        assert_eq!(stats.mode, vec![4.0]);
    }

    #[test]
    fn test_signed_zero_counts_as_one_value() {
        let stats = compute(&[-0.0, 0.0, 1.0]);
        assert_eq!(stats.mode.len(), 1);
        assert_eq!(stats.mode[0], 0.0);
    }

    #[test]
    fn test_odd_median_is_middle_element() {
        let stats = compute(&[9.0, 1.0, 5.0]);
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn test_pinned_quartiles() {
        let stats = compute(&[
            6.0, 7.0, 15.0, 36.0, 39.0, 40.0, 41.0, 42.0, 43.0, 47.0, 49.0,
        ]);
        assert_eq!(stats.quartiles.q1, 25.5);
        assert_eq!(stats.quartiles.q2, 40.0);
        assert_eq!(stats.quartiles.q3, 42.5);
        assert_eq!(stats.iqr, 17.0);
        assert_eq!(stats.quartiles.q2, stats.median);
    }

    #[test]
    fn test_single_observation() {
        let stats = compute(&[3.5]);
        assert_eq!(stats.mean, 3.5);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.sample_variance, None);
        assert_eq!(stats.sample_std_dev, None);
        assert!(stats.mode.is_empty());
        assert_eq!(stats.coefficient_of_variation, Some(0.0));
    }

    #[test]
    fn test_constant_sample_mode() {
        let stats = compute(&[5.0, 5.0, 5.0, 5.0]);
        assert_eq!(stats.mode, vec![5.0]);
        assert_eq!(stats.range, 0.0);
        assert_eq!(stats.iqr, 0.0);
    }

    #[test]
    fn test_coefficient_of_variation() {
        let stats = compute(&[-1.0, 1.0]);
        assert_eq!(stats.coefficient_of_variation, None);
        assert_eq!(stats.dispersion_level(), None);

        let stats = compute(&[9.0, 11.0]);
        // std_dev = 1, mean = 10
        assert!((stats.coefficient_of_variation.unwrap() - 10.0).abs() < 1e-12);
        assert_eq!(stats.dispersion_level(), Some(DispersionLevel::Low));
    }

    #[test]
    fn test_extreme_magnitudes_keep_finite_location_and_spread() {
        let stats = compute(&[-1e308, 0.0, 1e308]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.median, 0.0);
        assert!(stats.std_dev.is_finite());
        assert!((stats.std_dev / 8.16496580927726e307 - 1.0).abs() < 1e-12);
        assert!(stats.sample_std_dev.unwrap().is_finite());
        assert_eq!(stats.variance, f64::INFINITY);

        let stats = compute(&[1.5e308, 1.7e308]);
        assert!((stats.mean / 1.6e308 - 1.0).abs() < 1e-12);
        assert!((stats.median / 1.6e308 - 1.0).abs() < 1e-12);
        assert!((stats.quartiles.q2 / 1.6e308 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sample_fails() {
        let sample = Sample::new([]).unwrap();
        assert_eq!(
            DescriptiveStats::compute(&sample),
            Err(StatsError::InsufficientData)
        );
    }

    #[test]
    fn test_repeated_computation_is_identical() {
        let sample = Sample::new([3.2, 1.7, 9.9, 1.7, 4.4]).unwrap();
        let first = DescriptiveStats::compute(&sample).unwrap();
        let second = DescriptiveStats::compute(&sample).unwrap();
        assert_eq!(first.mean.to_bits(), second.mean.to_bits());
        assert_eq!(first.variance.to_bits(), second.variance.to_bits());
        assert_eq!(first, second);
    }
}
