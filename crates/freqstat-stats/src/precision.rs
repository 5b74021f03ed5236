//! Decimal rounding helpers for class interval bounds.
//!
//! Interval bounds are expressed on a power-of-ten grid derived from the
//! decimal resolution of the sample. Widths are rounded **up** to the grid
//! ([`ceil_to_unit`]) and bounds are rounded **half-up** to it
//! ([`round_half_up`]), which keeps them free of binary floating-point noise
//! such as `0.30000000000000004`.

/// Upper limit on the number of decimal places used for interval bounds.
pub const MAX_DECIMALS: usize = 10;

/// Relative slack applied before rounding up, so `3.0000000001` grid steps
/// count as three.
const CEIL_TOLERANCE: f64 = 1e-9;

/// Beyond this magnitude an `f64` has no fractional digits to round.
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Returns the number of fractional digits in the shortest round-trip
/// decimal representation of `value`, capped at [`MAX_DECIMALS`].
///
/// # Examples
///
/// ```
/// use freqstat_stats::precision::decimal_places;
///
/// assert_eq!(decimal_places(12.0), 0);
/// assert_eq!(decimal_places(0.25), 2);
/// assert_eq!(decimal_places(-3.5), 1);
/// assert_eq!(decimal_places(0.1 + 0.2), 10);
/// ```
#[must_use]
pub fn decimal_places(value: f64) -> usize {
    let repr = value.to_string();
    repr.split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
        .min(MAX_DECIMALS)
}

/// Rounds `value` to `places` decimals, resolving ties toward positive
/// infinity.
///
/// # Examples
///
/// ```
/// use freqstat_stats::precision::round_half_up;
///
/// assert_eq!(round_half_up(2.25, 1), 2.3);
/// assert_eq!(round_half_up(0.30000000000000004, 2), 0.3);
/// assert_eq!(round_half_up(-1.5, 0), -1.0);
/// ```
#[must_use]
pub fn round_half_up(value: f64, places: usize) -> f64 {
    let scale = scale(places);
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    // Nudge by one ulp so representations like 2.345 (= 2.34499999...) round up.
    (scaled + 0.5).next_up().floor() / scale
}

/// Rounds a non-negative `value` up to the next multiple of `10^-places`.
///
/// Values within a relative tolerance of a grid point snap to that point
/// instead of jumping to the next one.
///
/// # Examples
///
/// ```
/// use freqstat_stats::precision::ceil_to_unit;
///
/// assert_eq!(ceil_to_unit(1.125, 0), 2.0);
/// assert_eq!(ceil_to_unit(1.125, 1), 1.2);
/// assert_eq!(ceil_to_unit(0.1 + 0.2, 1), 0.3);
/// ```
#[must_use]
pub fn ceil_to_unit(value: f64, places: usize) -> f64 {
    let scale = scale(places);
    let steps = value * scale;
    if !steps.is_finite() || steps.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    let nearest = steps.round();
    let steps = if (steps - nearest).abs() <= CEIL_TOLERANCE * nearest.abs().max(1.0) {
        nearest
    } else {
        steps.ceil()
    };
    steps / scale
}

/// Size of one grid step for the given number of decimal places.
#[must_use]
pub fn unit(places: usize) -> f64 {
    1.0 / scale(places)
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn scale(places: usize) -> f64 {
    10f64.powi(places.min(MAX_DECIMALS) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_places_of_integers() {
        assert_eq!(decimal_places(0.0), 0);
        assert_eq!(decimal_places(-7.0), 0);
        assert_eq!(decimal_places(1e21), 0);
    }

    #[test]
    fn test_decimal_places_is_capped() {
        assert_eq!(decimal_places(1e-15), MAX_DECIMALS);
        assert_eq!(decimal_places(std::f64::consts::PI), MAX_DECIMALS);
    }

    #[test]
    fn test_round_half_up_ties() {
        assert_eq!(round_half_up(0.5, 0), 1.0);
        assert_eq!(round_half_up(1.25, 1), 1.3);
        assert_eq!(round_half_up(-0.5, 0), 0.0);
    }

    #[test]
    fn test_round_half_up_removes_float_noise() {
        assert_eq!(round_half_up(0.1 * 3.0, 1), 0.3);
        assert_eq!(round_half_up(1.1 + 2.2, 1), 3.3);
    }

    #[test]
    fn test_ceil_to_unit_exact_multiple_is_kept() {
        assert_eq!(ceil_to_unit(3.0, 0), 3.0);
        assert_eq!(ceil_to_unit(0.9, 1), 0.9);
    }

    #[test]
    fn test_ceil_to_unit_rounds_up() {
        assert_eq!(ceil_to_unit(1.125, 0), 2.0);
        assert_eq!(ceil_to_unit(0.125, 2), 0.13);
    }

    #[test]
    fn test_unit() {
        assert_eq!(unit(0), 1.0);
        assert!((unit(3) - 0.001).abs() < 1e-18);
    }
}
