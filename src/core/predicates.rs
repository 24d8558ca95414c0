//! Geometric predicates evaluated against mesh edges.
//!
//! Both predicates read the end points of an edge and degrade to `false` when
//! either end point is unset. Tolerances come from the mesh configuration.

use crate::core::quad_edge::{EdgeRef, QuadEdgeMesh};
use crate::core::traits::data_type::DataType;
use crate::geometry::point::Point;
use crate::geometry::predicates::sign_with_tolerance;
use crate::geometry::segment::is_point_on_segment;

impl<E: DataType> QuadEdgeMesh<E> {
    /// Returns `true` if `point` lies on the closed segment of `e`.
    ///
    /// # Panics
    ///
    /// Panics if `e` is stale.
    #[must_use]
    pub fn on_edge(&self, point: Point, e: EdgeRef) -> bool {
        self.segment(e)
            .is_some_and(|segment| is_point_on_segment(point, &segment, self.config.tolerance))
    }

    /// Returns `true` if `point` lies strictly right of the directed line
    /// through `e`.
    ///
    /// With `y_flip` set, the y axis is taken to grow downward and the sense
    /// of "right" is mirrored. Points within tolerance of the line are on
    /// neither side.
    ///
    /// # Panics
    ///
    /// Panics if `e` is stale.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quadedge::prelude::*;
    ///
    /// let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
    /// let e = mesh.make_edge_with_end_points(Point::new([0.0, 0.0]), Point::new([10.0, 0.0]));
    ///
    /// assert!(!mesh.right_of(false, Point::new([5.0, 5.0]), e));
    /// assert!(mesh.right_of(false, Point::new([5.0, -5.0]), e));
    /// assert!(mesh.right_of(true, Point::new([5.0, 5.0]), e));
    /// ```
    #[must_use]
    pub fn right_of(&self, y_flip: bool, point: Point, e: EdgeRef) -> bool {
        let (Some(org), Some(dest)) = (self.org(e), self.dest(e)) else {
            return false;
        };
        let expected = if y_flip { -1 } else { 1 };
        sign_with_tolerance((point - org).cross(dest - org), self.config.tolerance) == expected
    }
}
