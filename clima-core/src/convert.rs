//! Temperature unit conversion.

const KELVIN_OFFSET: f64 = 273.15;

/// Converts Celsius to Kelvin, rounded to one decimal place.
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    round_to_precision(celsius + KELVIN_OFFSET, 1)
}

/// Rounds `value` to `precision` decimal places, halves away from zero.
///
/// NaN and infinities pass through unchanged.
pub fn round_to_precision(value: f64, precision: i32) -> f64 {
    let p = 10f64.powi(precision);
    (value * p).round() / p
}
