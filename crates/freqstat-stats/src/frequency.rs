//! Grouped frequency distributions.
//!
//! [`FrequencyDistributionBuilder`] partitions a [`Sample`] into contiguous
//! class intervals and derives absolute, relative, percentage and cumulative
//! frequencies for each class.
//!
//! # Class layout
//!
//! - The class count defaults to Sturges' rule, `ceil(1 + log2(n))`.
//! - The class width is `range / k` rounded **up** to a power-of-ten grid that
//!   starts at the sample's decimal resolution. If that grid is so coarse that
//!   the last classes would start past the maximum, the grid is refined by a
//!   factor of ten until `k` distinct classes fit.
//! - Lower bounds are `min + i * width` rounded half-up to the grid.
//! - An explicit class count may not exceed [`MAX_CLASSES`].
//! - Every interval is half-open `[lower, upper)` except the last one, which
//!   is closed and always ends exactly at the sample maximum.
//!
//! Bounds that the capped grid cannot resolve (data below `1e-10` in scale)
//! are labelled with their shortest exact decimal form instead of a fixed
//! number of decimals.
//!
//! When every observation has the same value the table collapses to a single
//! closed interval `[value, value]` and carries a [`DegenerateRange`] notice.
//!
//! # Examples
//!
//! ```
//! use freqstat_stats::{frequency::FrequencyDistributionBuilder, sample::Sample};
//!
//! let sample = Sample::new((1..=10).map(f64::from)).unwrap();
//! let table = FrequencyDistributionBuilder::new().build(&sample).unwrap();
//!
//! assert_eq!(table.len(), 5);
//! assert_eq!(table.rows()[0].interval.to_string(), "[1, 3)");
//! assert_eq!(table.rows()[4].interval.to_string(), "[9, 10]");
//! assert_eq!(table.rows().iter().map(|r| r.absolute).sum::<usize>(), 10);
//! ```

use std::fmt;

use crate::{
    error::{DegenerateRange, StatsError},
    precision::{self, MAX_DECIMALS},
    sample::Sample,
};

/// Largest class count accepted as an explicit override.
pub const MAX_CLASSES: usize = 1000;

/// A class interval.
///
/// Half-open `[lower, upper)` unless `closed`, in which case the upper bound is
/// included. Only the last interval of a table is closed.
///
/// `Display` honours the formatter precision for both bounds:
///
/// ```
/// # use freqstat_stats::frequency::Interval;
/// let interval = Interval { lower: 1.0, upper: 2.5, closed: false };
/// assert_eq!(format!("{interval:.2}"), "[1.00, 2.50)");
/// assert!(interval.contains(1.0));
/// assert!(!interval.contains(2.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Interval {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Upper bound, inclusive only when `closed`.
    pub upper: f64,
    /// Whether `upper` belongs to the interval.
    pub closed: bool,
}

impl Interval {
    /// Returns whether `value` lies in the interval under the boundary rule.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if self.closed {
            self.lower <= value && value <= self.upper
        } else {
            self.lower <= value && value < self.upper
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the interval.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        // Halve first so bounds near `f64::MAX` do not overflow.
        self.lower / 2.0 + self.upper / 2.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.closed { ']' } else { ')' };
        match f.precision() {
            Some(p) => write!(f, "[{:.p$}, {:.p$}{close}", self.lower, self.upper),
            None => write!(f, "[{}, {}{close}", self.lower, self.upper),
        }
    }
}

/// One class of a frequency table.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FrequencyRow {
    pub interval: Interval,
    /// Midpoint of the interval.
    pub class_mark: f64,
    /// Number of observations in the class (`fi`).
    pub absolute: usize,
    /// `absolute / n` (`hi`).
    pub relative: f64,
    /// `relative * 100`.
    pub percentage: f64,
    /// Running total of `absolute` (`Fi`).
    pub cumulative_absolute: usize,
    /// Running total of `relative` (`Hi`).
    pub cumulative_relative: f64,
    /// Running total of `percentage`.
    pub cumulative_percentage: f64,
}

/// A grouped frequency distribution.
///
/// Built once by [`FrequencyDistributionBuilder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
    sample_size: usize,
    precision: usize,
    degenerate: Option<DegenerateRange>,
}

impl FrequencyTable {
    /// Rows in ascending interval order.
    #[must_use]
    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of observations the table was computed from.
    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Decimal places used for the interval bounds.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Set when all observations were equal and the table collapsed to one class.
    #[must_use]
    pub fn degenerate_range(&self) -> Option<&DegenerateRange> {
        self.degenerate.as_ref()
    }

    /// The row with the highest absolute frequency (the first one on ties).
    #[must_use]
    pub fn modal_class(&self) -> Option<&FrequencyRow> {
        self.rows
            .iter()
            .rev()
            .max_by_key(|row| row.absolute)
    }

    /// Decimal places that render every bound distinctly.
    ///
    /// `None` when some class is narrower than the grid unit at the table's
    /// precision, which happens only when the data is finer than
    /// [`MAX_DECIMALS`]; such bounds are shown in shortest exact form.
    #[must_use]
    pub fn label_precision(&self) -> Option<usize> {
        let half_unit = precision::unit(self.precision) / 2.0;
        self.rows
            .iter()
            .map(|row| row.interval.width())
            .all(|width| width == 0.0 || width >= half_unit)
            .then_some(self.precision)
    }

    /// Formats an interval of this table with the table's precision.
    #[must_use]
    pub fn interval_label(&self, interval: &Interval) -> String {
        match self.label_precision() {
            Some(prec) => format!("{interval:.prec$}"),
            None => interval.to_string(),
        }
    }

    /// Formats a class mark with one decimal more than the bounds.
    #[must_use]
    pub fn class_mark_label(&self, class_mark: f64) -> String {
        match self.label_precision() {
            Some(prec) => format!("{class_mark:.prec$}", prec = prec + 1),
            None => class_mark.to_string(),
        }
    }
}

/// Returns the class count given by Sturges' rule, `ceil(1 + log2(n))`.
///
/// Never less than one.
///
/// ```
/// # use freqstat_stats::frequency::sturges_class_count;
/// assert_eq!(sturges_class_count(1), 1);
/// assert_eq!(sturges_class_count(10), 5);
/// assert_eq!(sturges_class_count(100), 8);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
#[must_use]
pub fn sturges_class_count(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    ((1.0 + (n as f64).log2()).ceil() as usize).max(1)
}

/// Builds a [`FrequencyTable`] from a [`Sample`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrequencyDistributionBuilder {
    num_classes: Option<usize>,
}

impl FrequencyDistributionBuilder {
    /// A builder that picks the class count with Sturges' rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the class count; `None` restores Sturges' rule.
    #[must_use]
    pub fn with_num_classes(mut self, num_classes: Option<usize>) -> Self {
        self.num_classes = num_classes;
        self
    }

    #[must_use]
    pub fn num_classes(&self) -> Option<usize> {
        self.num_classes
    }

    /// Checks the class count override against `1..=MAX_CLASSES`.
    pub fn validate(&self) -> Result<(), StatsError> {
        match self.num_classes {
            Some(requested) if requested == 0 || requested > MAX_CLASSES => {
                Err(StatsError::InvalidClassCount { requested })
            }
            _ => Ok(()),
        }
    }

    /// Partitions `sample` into classes and computes their frequencies.
    ///
    /// # Errors
    ///
    /// - [`StatsError::InvalidClassCount`] if the override is zero or above
    ///   [`MAX_CLASSES`].
    /// - [`StatsError::InsufficientData`] if the sample is empty.
    pub fn build(&self, sample: &Sample) -> Result<FrequencyTable, StatsError> {
        self.validate()?;
        sample.ensure_not_empty()?;
        let (Some(min), Some(max)) = (sample.min(), sample.max()) else {
            return Err(StatsError::InsufficientData);
        };
        let n = sample.len();
        let num_classes = self
            .num_classes
            .unwrap_or_else(|| sturges_class_count(n));

        if max == min {
            let notice = DegenerateRange {
                value: min,
                requested_classes: num_classes,
            };
            log::warn!("{notice}");
            let interval = Interval {
                lower: min,
                upper: max,
                closed: true,
            };
            let rows = derive_rows(&[interval], &[n], n);
            return Ok(FrequencyTable {
                rows,
                sample_size: n,
                precision: sample.decimal_places(),
                degenerate: Some(notice),
            });
        }

        let layout = ClassLayout::new(min, max, num_classes, sample.decimal_places());
        log::debug!(
            "frequency table: n={n}, classes={num_classes}, width={}, precision={}",
            layout.width,
            layout.precision
        );

        let mut counts = vec![0; num_classes];
        for &value in sample.sorted() {
            counts[layout.class_index(value)] += 1;
        }
        let intervals = layout.intervals(max);
        let rows = derive_rows(&intervals, &counts, n);

        Ok(FrequencyTable {
            rows,
            sample_size: n,
            precision: layout.precision,
            degenerate: None,
        })
    }
}

/// Lower bounds of the classes for a non-degenerate sample.
#[derive(Debug)]
struct ClassLayout {
    lower_bounds: Vec<f64>,
    width: f64,
    precision: usize,
}

impl ClassLayout {
    #[expect(clippy::cast_precision_loss)]
    fn new(min: f64, max: f64, num_classes: usize, data_precision: usize) -> Self {
        debug_assert!(min < max && num_classes > 0);

        let k = num_classes as f64;
        let range = max - min;
        let raw_width = if range.is_finite() {
            range / k
        } else {
            (max / 2.0 - min / 2.0) / k * 2.0
        };
        for places in data_precision.min(MAX_DECIMALS)..=MAX_DECIMALS {
            let width = precision::ceil_to_unit(raw_width, places);
            let lower_bounds = (0..num_classes)
                .map(|i| {
                    if i == 0 {
                        min
                    } else {
                        precision::round_half_up(offset(min, width, i), places)
                    }
                })
                .collect::<Vec<_>>();
            if Self::fits(&lower_bounds, max) {
                return Self {
                    lower_bounds,
                    width,
                    precision: places,
                };
            }
        }

        // The grid cannot resolve the requested classes; use the exact width.
        let lower_bounds = (0..num_classes)
            .map(|i| offset(min, raw_width, i))
            .collect();
        Self {
            lower_bounds,
            width: raw_width,
            precision: MAX_DECIMALS,
        }
    }

    /// Strictly ascending finite bounds with every class starting below the maximum.
    fn fits(lower_bounds: &[f64], max: f64) -> bool {
        lower_bounds.iter().all(|b| b.is_finite())
            && lower_bounds.windows(2).all(|w| w[0] < w[1])
            && lower_bounds.last().is_some_and(|&last| last < max)
    }

    fn class_index(&self, value: f64) -> usize {
        // Index of the last class whose lower bound is <= value.
        self.lower_bounds
            .partition_point(|&lower| lower <= value)
            .saturating_sub(1)
    }

    fn intervals(&self, max: f64) -> Vec<Interval> {
        let last = self.lower_bounds.len() - 1;
        self.lower_bounds
            .iter()
            .enumerate()
            .map(|(i, &lower)| {
                if i == last {
                    Interval {
                        lower,
                        upper: max,
                        closed: true,
                    }
                } else {
                    Interval {
                        lower,
                        upper: self.lower_bounds[i + 1],
                        closed: false,
                    }
                }
            })
            .collect()
    }
}

/// `min + i * width`, stepping in two halves when the full offset overflows.
#[expect(clippy::cast_precision_loss)]
fn offset(min: f64, width: f64, i: usize) -> f64 {
    if i == 0 {
        return min;
    }
    let step = i as f64 * width;
    if step.is_finite() {
        min + step
    } else {
        let half = i as f64 * (width / 2.0);
        min + half + half
    }
}

#[expect(clippy::cast_precision_loss)]
fn derive_rows(intervals: &[Interval], counts: &[usize], n: usize) -> Vec<FrequencyRow> {
    let n = n as f64;
    let mut cumulative_absolute = 0;
    let mut cumulative_relative = 0.0;
    let mut cumulative_percentage = 0.0;
    intervals
        .iter()
        .zip(counts)
        .map(|(&interval, &absolute)| {
            let relative = absolute as f64 / n;
            let percentage = relative * 100.0;
            cumulative_absolute += absolute;
            cumulative_relative += relative;
            cumulative_percentage += percentage;
            FrequencyRow {
                interval,
                class_mark: interval.midpoint(),
                absolute,
                relative,
                percentage,
                cumulative_absolute,
                cumulative_relative,
                cumulative_percentage,
            }
        })
        .collect()
}
