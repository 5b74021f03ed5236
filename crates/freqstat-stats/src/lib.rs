//! Statistical computation engine for single-attribute frequency analysis.
//!
//! This crate turns a numeric sample into:
//!
//! - **Frequency distribution**: Sturges' rule class intervals with absolute,
//!   relative, percentage and cumulative frequencies
//! - **Descriptive statistics**: mean, median, mode, population variance and
//!   standard deviation, range, quartiles and interquartile range
//!
//! All computations are pure functions over an immutable [`sample::Sample`].
//!
//! # Modules
//!
//! - [`sample`]: Validated, immutable input data
//! - [`frequency`]: Grouped frequency tables
//! - [`descriptive`]: Descriptive statistics
//! - [`quantile`]: Linear-interpolation quantiles and quartiles
//! - [`precision`]: Decimal rounding policy for interval bounds
//! - [`analysis`]: Runs both computations over one sample
//! - [`error`]: Error and notice types
//!
//! # Examples
//!
//! ## Running a complete analysis
//!
//! ```
//! use freqstat_stats::{
//!     analysis::{AnalysisConfig, AnalysisEngine},
//!     sample::Sample,
//! };
//!
//! let sample = Sample::new((1..=10).map(f64::from)).unwrap();
//! let analysis = AnalysisEngine::new(AnalysisConfig::default())
//!     .run(&sample)
//!     .unwrap();
//!
//! assert_eq!(analysis.stats.mean, 5.5);
//! assert_eq!(analysis.table.len(), 5);
//! ```
//!
//! ## Building only a frequency table
//!
//! ```
//! use freqstat_stats::{frequency::FrequencyDistributionBuilder, sample::Sample};
//!
//! let sample = Sample::new([12.5, 14.0, 15.25, 18.0, 21.75]).unwrap();
//! let table = FrequencyDistributionBuilder::new()
//!     .with_num_classes(Some(3))
//!     .build(&sample)
//!     .unwrap();
//!
//! for row in table.rows() {
//!     println!("{} {}", table.interval_label(&row.interval), row.absolute);
//! }
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use freqstat_stats::{descriptive::DescriptiveStats, sample::Sample};
//!
//! let sample = Sample::new([1.0, 1.0, 2.0, 2.0, 3.0]).unwrap();
//! let stats = DescriptiveStats::compute(&sample).unwrap();
//! assert_eq!(stats.mode, vec![1.0, 2.0]);
//! ```

pub mod analysis;
pub mod descriptive;
pub mod error;
pub mod frequency;
pub mod precision;
pub mod quantile;
pub mod sample;
