//! Scale-invariant near-zero tests.
//!
//! Instead of comparing against a fixed epsilon, a value counts as zero when
//! the unbiased binary exponent of its IEEE-754 representation falls below
//! [`ACCURACY`]. This treats magnitudes under roughly 2^-40 (about 1e-12) as
//! zero regardless of the scene's scale.

/// Exponent threshold below which a number is considered zero.
const ACCURACY: i32 = -40;

/// Unbiased exponent of a double.
#[inline]
fn exponent(number: f64) -> i32 {
    ((number.to_bits() >> 52) & 0x7ff) as i32 - 1023
}

/// Returns true if `number` is zero or close enough to be treated as zero.
#[inline]
pub fn is_zero(number: f64) -> bool {
    exponent(number) < ACCURACY
}

/// Snaps `number` to exactly 0.0 when it is near zero.
#[inline]
pub fn align_zero(number: f64) -> f64 {
    if is_zero(number) {
        0.0
    } else {
        number
    }
}

/// Returns true if both numbers are non-zero and share a sign.
#[inline]
pub fn same_sign(a: f64, b: f64) -> bool {
    (a < 0.0 && b < 0.0) || (a > 0.0 && b > 0.0)
}
