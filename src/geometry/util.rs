//! Small geometric utilities over point sequences.

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;

/// Axis-aligned bounding box, stored as `(min_x, min_y, max_x, max_y)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest x coordinate.
    pub min_x: f64,
    /// Smallest y coordinate.
    pub min_y: f64,
    /// Largest x coordinate.
    pub max_x: f64,
    /// Largest y coordinate.
    pub max_y: f64,
}

impl BoundingBox {
    /// A box covering exactly one point.
    #[must_use]
    pub const fn from_point(point: Point) -> Self {
        Self {
            min_x: point.x(),
            min_y: point.y(),
            max_x: point.x(),
            max_y: point.y(),
        }
    }

    /// Widens the box so it covers `point`. The box never shrinks.
    pub const fn extend(&mut self, point: Point) {
        if point.x() < self.min_x {
            self.min_x = point.x();
        } else if point.x() > self.max_x {
            self.max_x = point.x();
        }
        if point.y() < self.min_y {
            self.min_y = point.y();
        } else if point.y() > self.max_y {
            self.max_y = point.y();
        }
    }

    /// The box as a `[min_x, min_y, max_x, max_y]` array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Returns `true` if `point` lies inside the box or on its border.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x())
            && (self.min_y..=self.max_y).contains(&point.y())
    }
}

/// Computes the bounding box of a point sequence in a single left-to-right
/// fold: the first point seeds both corners, every later point can only
/// widen the box.
///
/// Returns `None` for an empty sequence.
///
/// # Examples
///
/// ```rust
/// use quadedge::geometry::point::Point;
/// use quadedge::geometry::util::bounding_box;
///
/// let bbox = bounding_box([
///     Point::new([1.0, 1.0]),
///     Point::new([5.0, 2.0]),
///     Point::new([-3.0, 9.0]),
/// ])
/// .unwrap();
/// assert_eq!(bbox.to_array(), [-3.0, 1.0, 5.0, 9.0]);
/// ```
#[must_use]
pub fn bounding_box<I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = Point>,
{
    let mut points = points.into_iter();
    let first = points.next()?;
    Some(points.fold(BoundingBox::from_point(first), |mut bbox, point| {
        bbox.extend(point);
        bbox
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_of_scattered_points() {
        let bbox = bounding_box(
            [[1.0, 1.0], [5.0, 2.0], [-3.0, 9.0]]
                .into_iter()
                .map(Point::new),
        )
        .unwrap();
        assert_eq!(bbox.to_array(), [-3.0, 1.0, 5.0, 9.0]);
    }

    #[test]
    fn bounding_box_of_empty_sequence_is_none() {
        assert!(bounding_box(std::iter::empty()).is_none());
    }

    #[test]
    fn single_point_box_is_degenerate() {
        let p = Point::new([2.5, -1.0]);
        let bbox = bounding_box([p]).unwrap();
        assert_eq!(bbox, BoundingBox::from_point(p));
        assert!(bbox.contains(p));
    }

    #[test]
    fn later_points_only_widen() {
        let mut bbox = BoundingBox::from_point(Point::new([0.0, 0.0]));
        bbox.extend(Point::new([4.0, 4.0]));
        bbox.extend(Point::new([1.0, 1.0]));
        assert_eq!(bbox.to_array(), [0.0, 0.0, 4.0, 4.0]);
        assert!(bbox.contains(Point::new([4.0, 0.0])));
        assert!(!bbox.contains(Point::new([4.1, 0.0])));
    }
}
