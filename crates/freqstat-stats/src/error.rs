/// Errors produced by the statistical computations.
///
/// These are the only failures the engine reports; I/O and input-format
/// problems belong to the callers that build the [`Sample`](crate::sample::Sample).
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// The sample holds no observations.
    #[display("insufficient data: at least one observation is required")]
    InsufficientData,
    /// An explicit class count override was zero or above
    /// [`MAX_CLASSES`](crate::frequency::MAX_CLASSES).
    #[display(
        "invalid class count {requested}: must be between 1 and {}",
        crate::frequency::MAX_CLASSES
    )]
    InvalidClassCount { requested: usize },
    /// An observation was `NaN` or infinite.
    #[display("observation #{index} is not a finite number ({value})")]
    NonFiniteValue { index: usize, value: f64 },
}

/// Notice recorded when every observation has the same value.
///
/// The frequency table then collapses to a single closed interval
/// `[value, value]`. This is not an error; it is attached to the table and
/// logged so callers can tell the table shape differs from the general case.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, derive_more::Display)]
#[display(
    "all observations equal {value}; collapsed {requested_classes} requested classes into one"
)]
pub struct DegenerateRange {
    /// The single value shared by every observation.
    pub value: f64,
    /// The class count that would have been used for a non-degenerate sample.
    pub requested_classes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StatsError::InsufficientData.to_string(),
            "insufficient data: at least one observation is required"
        );
        assert_eq!(
            StatsError::InvalidClassCount { requested: 0 }.to_string(),
            "invalid class count 0: must be between 1 and 1000"
        );
        let err = StatsError::NonFiniteValue {
            index: 3,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "observation #3 is not a finite number (NaN)");
    }

    #[test]
    fn test_degenerate_notice_message() {
        let notice = DegenerateRange {
            value: 5.0,
            requested_classes: 3,
        };
        assert_eq!(
            notice.to_string(),
            "all observations equal 5; collapsed 3 requested classes into one"
        );
    }
}
