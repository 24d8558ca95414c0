//! Closed line segments and the point-on-segment test.

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;
use crate::geometry::predicates::sign_with_tolerance;

/// A closed line segment between two points.
///
/// # Examples
///
/// ```rust
/// use quadedge::geometry::point::Point;
/// use quadedge::geometry::segment::Segment;
///
/// let s = Segment::new(Point::new([0.0, 0.0]), Point::new([4.0, 0.0]));
/// assert!(s.contains_point(Point::new([2.0, 0.0]), 1e-9));
/// assert!(!s.contains_point(Point::new([5.0, 0.0]), 1e-9));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First end point.
    pub start: Point,
    /// Second end point.
    pub end: Point,
}

impl Segment {
    /// Creates a segment from its two end points.
    #[inline]
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// The displacement from `start` to `end`.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Point {
        self.end - self.start
    }

    /// Returns `true` if `point` lies on the closed segment.
    ///
    /// The point must be collinear with the segment (cross product within
    /// `tolerance` of zero, scaled by the segment length) and its projection
    /// must fall between the end points, both end points included.
    #[must_use]
    pub fn contains_point(&self, point: Point, tolerance: f64) -> bool {
        let direction = self.direction();
        let offset = point - self.start;
        let length_sq = direction.squared_norm();

        if length_sq <= tolerance * tolerance {
            return offset.squared_norm() <= tolerance * tolerance;
        }

        let scaled_tolerance = tolerance * length_sq.sqrt();
        if sign_with_tolerance(direction.cross(offset), scaled_tolerance) != 0 {
            return false;
        }

        let projection = offset.dot(direction);
        projection >= -scaled_tolerance && projection <= length_sq + scaled_tolerance
    }
}

/// Returns `true` if `point` lies on the closed segment between the two end
/// points, using `tolerance` for the collinearity and range checks.
#[inline]
#[must_use]
pub fn is_point_on_segment(point: Point, segment: &Segment, tolerance: f64) -> bool {
    segment.contains_point(point, tolerance)
}
