//! Decimal precision rounding for values sent to the client.

/// Round `num` to `precision` decimal places, halves away from zero.
///
/// `to_fixed(1.23456, 2) == 1.23`, `to_fixed(116.123456789, 8) == 116.12345679`.
#[inline]
pub fn to_fixed(num: f64, precision: i32) -> f64 {
    let scale = 10f64.powi(precision);
    (num * scale).round() / scale
}
