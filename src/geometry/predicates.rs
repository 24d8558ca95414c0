//! Floating-point sign predicate.
//!
//! Every orientation decision in the crate is reduced to the sign of a cross
//! product. The sign is taken with an absolute tolerance: values within the
//! tolerance of zero are reported as zero, so rounding noise on nearly
//! collinear input never flips an orientation.

use approx::abs_diff_eq;

use crate::core::config::DEFAULT_TOLERANCE;

/// Returns the sign of `value` using [`DEFAULT_TOLERANCE`].
///
/// See [`sign_with_tolerance`].
///
/// # Examples
///
/// ```rust
/// use quadedge::geometry::predicates::sign;
///
/// assert_eq!(sign(3.5), 1);
/// assert_eq!(sign(-0.25), -1);
/// assert_eq!(sign(1e-9), 0);
/// ```
#[inline]
#[must_use]
pub fn sign(value: f64) -> i8 {
    sign_with_tolerance(value, DEFAULT_TOLERANCE)
}

/// Returns `0` if `value` is within `tolerance` of zero, otherwise `-1` or
/// `1` following the sign bit of `value`.
///
/// `NaN` has no meaningful sign and is reported as `0`.
///
/// # Examples
///
/// ```rust
/// use quadedge::geometry::predicates::sign_with_tolerance;
///
/// assert_eq!(sign_with_tolerance(0.01, 0.1), 0);
/// assert_eq!(sign_with_tolerance(0.01, 0.001), 1);
/// assert_eq!(sign_with_tolerance(f64::NEG_INFINITY, 0.1), -1);
/// ```
#[inline]
#[must_use]
pub fn sign_with_tolerance(value: f64, tolerance: f64) -> i8 {
    if value.is_nan() || abs_diff_eq!(value, 0.0, epsilon = tolerance) {
        0
    } else if value.is_sign_negative() {
        -1
    } else {
        1
    }
}
