//! Millimeter measurement helpers.

/// Smallest diameter accepted on input.
pub const MIN_DIAMETER_MM: f64 = 1.0;

/// Largest diameter accepted on input.
pub const MAX_DIAMETER_MM: f64 = 100.0;

/// Rounds a measurement to the nearest whole millimeter, halves away from zero.
///
/// 5.5 becomes 6 and 5.6 becomes 6; 5.4 stays 5.
pub fn round_to_nearest_mm(value_mm: f64) -> f64 {
    value_mm.round()
}

/// Returns true for a usable, strictly positive measurement.
pub fn is_positive_measurement(value_mm: f64) -> bool {
    value_mm.is_finite() && value_mm > 0.0
}
