/// First, second and third quartiles of a dataset.
///
/// All three are computed with [`linear_quantile`], the single quantile
/// convention used throughout the crate.
///
/// # Examples
///
/// ```
/// use freqstat_stats::quantile::Quartiles;
///
/// let sorted = [6.0, 7.0, 15.0, 36.0, 39.0, 40.0, 41.0, 42.0, 43.0, 47.0, 49.0];
/// let quartiles = Quartiles::from_sorted(&sorted).unwrap();
///
/// assert_eq!(quartiles.q1, 25.5);
/// assert_eq!(quartiles.q2, 40.0);
/// assert_eq!(quartiles.q3, 42.5);
/// assert_eq!(quartiles.iqr(), 17.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Quartiles {
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile (the median).
    pub q2: f64,
    /// 75th percentile.
    pub q3: f64,
}

impl Quartiles {
    /// Computes quartiles from values sorted in ascending order.
    ///
    /// Returns `None` if `sorted_values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        Some(Self {
            q1: linear_quantile(sorted_values, 0.25)?,
            q2: linear_quantile(sorted_values, 0.50)?,
            q3: linear_quantile(sorted_values, 0.75)?,
        })
    }

    /// Interquartile range, `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Computes a quantile by linear interpolation between order statistics.
///
/// The quantile `fraction` (0.0 to 1.0) is located at the 0-indexed position
/// `fraction * (n - 1)` of the sorted data. When that position falls between
/// two elements, the result is interpolated linearly between them. This is
/// the "type 7" estimator of Hyndman and Fan.
///
/// `fraction` is clamped into `[0.0, 1.0]`. Returns `None` if the input is
/// empty.
///
/// # Examples
///
/// ```
/// use freqstat_stats::quantile::linear_quantile;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(linear_quantile(&sorted, 0.0), Some(1.0));
/// assert_eq!(linear_quantile(&sorted, 0.5), Some(2.5));
/// assert_eq!(linear_quantile(&sorted, 0.25), Some(1.75));
/// assert_eq!(linear_quantile(&sorted, 1.0), Some(4.0));
/// assert_eq!(linear_quantile(&[], 0.5), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn linear_quantile(sorted_values: &[f64], fraction: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    let position = fraction.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - position.floor();
    let low = sorted_values[lower];
    let high = sorted_values[upper.min(last)];
    let value = low + (high - low) * weight;
    if value.is_finite() {
        Some(value)
    } else {
        // `high - low` overflowed; interpolate without the difference.
        Some(low * (1.0 - weight) + high * weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value() {
        let quartiles = Quartiles::from_sorted(&[7.0]).unwrap();
        assert_eq!(quartiles.q1, 7.0);
        assert_eq!(quartiles.q2, 7.0);
        assert_eq!(quartiles.q3, 7.0);
        assert_eq!(quartiles.iqr(), 0.0);
    }

    #[test]
    fn test_interpolates_across_overflowing_gap() {
        let sorted = [-1.5e308, 1.5e308];
        assert_eq!(linear_quantile(&sorted, 0.5), Some(0.0));
        assert_eq!(linear_quantile(&sorted, 0.0), Some(-1.5e308));
        assert_eq!(linear_quantile(&sorted, 1.0), Some(1.5e308));
    }

    #[test]
    fn test_empty() {
        assert!(Quartiles::from_sorted(&[]).is_none());
    }

    #[test]
    fn test_even_count_interpolates() {
        // positions 0.75, 1.5, 2.25
        let quartiles = Quartiles::from_sorted(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(quartiles.q1, 1.75);
        assert_eq!(quartiles.q2, 2.5);
        assert_eq!(quartiles.q3, 3.25);
    }

    #[test]
    fn test_one_to_ten() {
        let sorted = (1..=10).map(f64::from).collect::<Vec<_>>();
        let quartiles = Quartiles::from_sorted(&sorted).unwrap();
        assert_eq!(quartiles.q1, 3.25);
        assert_eq!(quartiles.q2, 5.5);
        assert_eq!(quartiles.q3, 7.75);
    }

    #[test]
    fn test_fraction_is_clamped() {
        let sorted = [1.0, 2.0];
        assert_eq!(linear_quantile(&sorted, -1.0), Some(1.0));
        assert_eq!(linear_quantile(&sorted, 2.0), Some(2.0));
    }

    #[test]
    #[should_panic(expected = "values must be sorted in ascending order")]
    fn test_unsorted_input_panics() {
        let _ = Quartiles::from_sorted(&[2.0, 1.0]);
    }
}
