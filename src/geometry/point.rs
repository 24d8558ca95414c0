//! Two-dimensional points for planar subdivisions.
//!
//! Points are immutable values. Many directed edges refer to the same vertex
//! position, and each edge holds its own copy of it. Moving a vertex means
//! assigning new end points to the edges that reference it; a point is never
//! edited field by field.
//!
//! # Equality Semantics
//!
//! `PartialEq` compares coordinates exactly, the same way `f64` does. For
//! comparisons that must absorb rounding noise (coincident destinations,
//! shared origins), use the [`approx`] traits implemented here, for example
//! `abs_diff_eq!(a, b, epsilon = tol)`.

#![forbid(unsafe_code)]

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// =============================================================================
// POINT STRUCT DEFINITION
// =============================================================================

/// A point (or a displacement vector) in the plane.
///
/// # Examples
///
/// ```rust
/// use quadedge::geometry::point::Point;
///
/// let p = Point::new([1.0, 2.0]);
/// assert_eq!(p.x(), 1.0);
/// assert_eq!(p.coords(), &[1.0, 2.0]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    coords: [f64; 2],
}

// =============================================================================
// PUBLIC API
// =============================================================================

impl Point {
    /// Creates a point from its `[x, y]` coordinates.
    #[inline]
    #[must_use]
    pub const fn new(coords: [f64; 2]) -> Self {
        Self { coords }
    }

    /// The x coordinate.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.coords[0]
    }

    /// The y coordinate.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.coords[1]
    }

    /// Returns a reference to the `[x, y]` coordinate array.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> &[f64; 2] {
        &self.coords
    }

    /// Two-dimensional cross product `self.x * other.y - self.y * other.x`.
    ///
    /// Treating both points as vectors, the result is positive when `other`
    /// lies counter-clockwise of `self` (y axis pointing up).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quadedge::geometry::point::Point;
    ///
    /// let east = Point::new([1.0, 0.0]);
    /// let north = Point::new([0.0, 1.0]);
    /// assert_eq!(east.cross(north), 1.0);
    /// assert_eq!(north.cross(east), -1.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x().mul_add(other.y(), -(self.y() * other.x()))
    }

    /// Dot product of the two points taken as vectors.
    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x().mul_add(other.x(), self.y() * other.y())
    }

    /// Squared Euclidean length of the point taken as a vector.
    #[inline]
    #[must_use]
    pub fn squared_norm(self) -> f64 {
        self.dot(self)
    }

    /// Returns `true` if both coordinates are finite.
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.coords[0].is_finite() && self.coords[1].is_finite()
    }
}

// =============================================================================
// TRAIT IMPLEMENTATIONS
// =============================================================================

impl From<[f64; 2]> for Point {
    #[inline]
    fn from(coords: [f64; 2]) -> Self {
        Self::new(coords)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new([x, y])
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(point: Point) -> Self {
        point.coords
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new([self.x() - rhs.x(), self.y() - rhs.y()])
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new([self.x() + rhs.x(), self.y() + rhs.y()])
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        crate::core::config::DEFAULT_TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.coords[0].abs_diff_eq(&other.coords[0], epsilon)
            && self.coords[1].abs_diff_eq(&other.coords[1], epsilon)
    }
}

impl RelativeEq for Point {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.coords[0].relative_eq(&other.coords[0], epsilon, max_relative)
            && self.coords[1].relative_eq(&other.coords[1], epsilon, max_relative)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn point_arithmetic() {
        let a = Point::new([3.0, 4.0]);
        let b = Point::new([1.0, 1.0]);

        assert_eq!(a - b, Point::new([2.0, 3.0]));
        assert_eq!(a + b, Point::new([4.0, 5.0]));
        assert_relative_eq!(a.dot(b), 7.0);
        assert_relative_eq!(a.squared_norm(), 25.0);
    }

    #[test]
    fn cross_product_sign_follows_rotation() {
        let v = Point::new([10.0, 0.0]);
        assert!(Point::new([5.0, 5.0]).cross(v) < 0.0);
        assert!(Point::new([5.0, -5.0]).cross(v) > 0.0);
        assert_relative_eq!(Point::new([2.0, 0.0]).cross(v), 0.0);
    }

    #[test]
    fn tolerance_equality_absorbs_rounding_noise() {
        let a = Point::new([0.1 + 0.2, 1.0]);
        let b = Point::new([0.3, 1.0]);

        assert_ne!(a, b);
        assert_abs_diff_eq!(a, b);
        assert!(!abs_diff_eq!(a, Point::new([0.3, 1.1]), epsilon = 1e-6));
    }

    #[test]
    fn conversions_and_display() {
        let p: Point = (1.5, -2.0).into();
        let coords: [f64; 2] = p.into();
        assert_eq!(coords, [1.5, -2.0]);
        assert_eq!(p.to_string(), "(1.5, -2)");
        assert!(p.is_finite());
        assert!(!Point::new([f64::NAN, 0.0]).is_finite());
    }
}
