use crate::{error::StatsError, precision};

/// An immutable, in-memory collection of numeric observations.
///
/// Missing values must already be filtered out by the caller; construction
/// only rejects values that are not finite. The sample keeps the
/// observations in their original order and also caches an ascending copy,
/// so every calculator works from the same sorted data without re-sorting.
///
/// An empty sample can be built, but every computation on it fails with
/// [`StatsError::InsufficientData`].
///
/// # Examples
///
/// ```
/// use freqstat_stats::sample::Sample;
///
/// let sample = Sample::new([3.0, 1.0, 2.0]).unwrap();
/// assert_eq!(sample.values(), &[3.0, 1.0, 2.0]);
/// assert_eq!(sample.sorted(), &[1.0, 2.0, 3.0]);
/// assert_eq!(sample.min(), Some(1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
    sorted: Vec<f64>,
}

impl Sample {
    /// Builds a sample from observations in their original order.
    ///
    /// Returns [`StatsError::NonFiniteValue`] for the first `NaN` or infinite
    /// observation.
    pub fn new<I>(values: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(StatsError::NonFiniteValue { index, value });
        }
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        Ok(Self { values, sorted })
    }

    /// Number of observations (`n`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observations in their original order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Observations sorted in ascending order.
    #[must_use]
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.sorted.first().copied()
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.sorted.last().copied()
    }

    /// Largest number of fractional digits among the observations, capped at
    /// [`precision::MAX_DECIMALS`].
    ///
    /// ```
    /// # use freqstat_stats::sample::Sample;
    /// let sample = Sample::new([1.0, 2.5, 3.75]).unwrap();
    /// assert_eq!(sample.decimal_places(), 2);
    /// ```
    #[must_use]
    pub fn decimal_places(&self) -> usize {
        self.values
            .iter()
            .map(|&v| precision::decimal_places(v))
            .max()
            .unwrap_or(0)
    }

    /// Returns `Err(InsufficientData)` if the sample is empty.
    pub(crate) fn ensure_not_empty(&self) -> Result<(), StatsError> {
        if self.is_empty() {
            return Err(StatsError::InsufficientData);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_nan() {
        let err = Sample::new([1.0, f64::NAN, 2.0]).unwrap_err();
        assert!(matches!(err, StatsError::NonFiniteValue { index: 1, .. }));
    }

    #[test]
    fn test_rejects_infinity() {
        let err = Sample::new([f64::NEG_INFINITY]).unwrap_err();
        assert!(matches!(err, StatsError::NonFiniteValue { index: 0, .. }));
    }

    #[test]
    fn test_empty_sample() {
        let sample = Sample::new([]).unwrap();
        assert!(sample.is_empty());
        assert_eq!(sample.min(), None);
        assert_eq!(sample.max(), None);
        assert_eq!(sample.decimal_places(), 0);
        assert_eq!(sample.ensure_not_empty(), Err(StatsError::InsufficientData));
    }

    #[test]
    fn test_keeps_original_order() {
        let sample = Sample::new([5.0, -1.0, 3.0]).unwrap();
        assert_eq!(sample.values(), &[5.0, -1.0, 3.0]);
        assert_eq!(sample.sorted(), &[-1.0, 3.0, 5.0]);
        assert_eq!(sample.len(), 3);
        assert_eq!(sample.max(), Some(5.0));
    }
}
