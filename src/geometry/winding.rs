//! Winding order: which rotational sense counts as "positive".
//!
//! A [`WindingOrder`] combines two conventions that together decide how an
//! ordered point sequence is classified:
//!
//! - whether the y axis grows upward (mathematical convention) or downward
//!   (screen and raster convention), and
//! - whether clockwise or counter-clockwise is the positive sense used to
//!   bound faces.
//!
//! Origin rings are kept sorted in the positive sense, so the quad-edge
//! operators and the validator ask the winding order, never the raw sign of a
//! cross product, which way a turn goes.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

use crate::geometry::point::Point;
use crate::geometry::predicates::sign_with_tolerance;

/// Rotational sense of an ordered point sequence, as seen by the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winding {
    /// The points turn clockwise.
    Clockwise,
    /// The points turn counter-clockwise.
    CounterClockwise,
    /// The points are collinear, or there are fewer than three of them.
    Collinear,
}

impl Winding {
    /// Returns `true` for [`Winding::Clockwise`].
    #[must_use]
    pub const fn is_clockwise(self) -> bool {
        matches!(self, Self::Clockwise)
    }

    /// Returns `true` for [`Winding::CounterClockwise`].
    #[must_use]
    pub const fn is_counter_clockwise(self) -> bool {
        matches!(self, Self::CounterClockwise)
    }

    /// Returns `true` for [`Winding::Collinear`].
    #[must_use]
    pub const fn is_collinear(self) -> bool {
        matches!(self, Self::Collinear)
    }

    /// The opposite rotational sense; collinear stays collinear.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
            Self::Collinear => Self::Collinear,
        }
    }
}

impl fmt::Display for Winding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => write!(f, "clockwise"),
            Self::CounterClockwise => write!(f, "counter-clockwise"),
            Self::Collinear => write!(f, "collinear"),
        }
    }
}

/// The rotational convention used to keep faces consistently oriented.
///
/// The default is the mathematical convention: y grows upward and
/// counter-clockwise is positive.
///
/// # Examples
///
/// ```rust
/// use quadedge::geometry::point::Point;
/// use quadedge::geometry::winding::{Winding, WindingOrder};
///
/// let triangle = [
///     Point::new([0.0, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([0.0, 1.0]),
/// ];
/// let order = WindingOrder::default();
/// assert_eq!(order.of_points(&triangle, 1e-9), Winding::CounterClockwise);
///
/// // The same triangle drawn on a screen, where y grows downward.
/// let screen = order.with_y_positive_down(true);
/// assert_eq!(screen.of_points(&triangle, 1e-9), Winding::Clockwise);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindingOrder {
    /// The y axis grows downward (screen coordinates).
    pub y_positive_down: bool,
    /// Clockwise, rather than counter-clockwise, is the positive sense.
    pub clockwise_positive: bool,
}

impl WindingOrder {
    /// Counter-clockwise positive, y up.
    #[must_use]
    pub const fn counter_clockwise() -> Self {
        Self {
            y_positive_down: false,
            clockwise_positive: false,
        }
    }

    /// Clockwise positive, y up.
    #[must_use]
    pub const fn clockwise() -> Self {
        Self {
            y_positive_down: false,
            clockwise_positive: true,
        }
    }

    /// Returns a copy with the y axis convention replaced.
    #[must_use]
    pub const fn with_y_positive_down(self, y_positive_down: bool) -> Self {
        Self {
            y_positive_down,
            ..self
        }
    }

    /// The positive rotational sense.
    #[must_use]
    pub const fn positive(self) -> Winding {
        if self.clockwise_positive {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    /// Returns `true` if the positive sense is counter-clockwise in the
    /// mathematical (y up) frame.
    const fn positive_is_math_ccw(self) -> bool {
        self.clockwise_positive == self.y_positive_down
    }

    /// Classifies an ordered point sequence (an implicitly closed polygon).
    ///
    /// Uses the shoelace signed area; an area within `tolerance` of zero, or a
    /// sequence of fewer than three points, is [`Winding::Collinear`].
    #[must_use]
    pub fn of_points(self, points: &[Point], tolerance: f64) -> Winding {
        if points.len() < 3 {
            return Winding::Collinear;
        }
        let twice_area: f64 = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(a, b)| a.cross(*b))
            .sum();
        self.classify(twice_area, tolerance)
    }

    fn classify(self, math_ccw_measure: f64, tolerance: f64) -> Winding {
        let math = match sign_with_tolerance(math_ccw_measure, tolerance) {
            1 => Winding::CounterClockwise,
            -1 => Winding::Clockwise,
            _ => return Winding::Collinear,
        };
        if self.y_positive_down {
            math.reversed()
        } else {
            math
        }
    }

    /// Angle of `direction` measured in the positive sense from the +x axis,
    /// in `(-π, π]`.
    #[must_use]
    pub fn positive_angle(self, direction: Point) -> f64 {
        let y = if self.positive_is_math_ccw() {
            direction.y()
        } else {
            -direction.y()
        };
        y.atan2(direction.x())
    }

    /// Positive-sense sweep from direction `from` to direction `to`, in
    /// `[0, 2π)`. Identical directions sweep zero.
    #[must_use]
    pub fn positive_sweep(self, from: Point, to: Point) -> f64 {
        (self.positive_angle(to) - self.positive_angle(from)).rem_euclid(TAU)
    }
}

impl fmt::Display for WindingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} positive, y {}",
            self.positive(),
            if self.y_positive_down { "down" } else { "up" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-9;

    fn square() -> [Point; 4] {
        [
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([1.0, 1.0]),
            Point::new([0.0, 1.0]),
        ]
    }

    #[test]
    fn of_points_classifies_polygons() {
        let order = WindingOrder::default();
        let mut pts = square();
        assert_eq!(order.of_points(&pts, TOL), Winding::CounterClockwise);
        pts.reverse();
        assert_eq!(order.of_points(&pts, TOL), Winding::Clockwise);
    }

    #[test]
    fn of_points_reports_degenerate_input_as_collinear() {
        let order = WindingOrder::default();
        let line = [
            Point::new([0.0, 0.0]),
            Point::new([1.0, 1.0]),
            Point::new([2.0, 2.0]),
        ];
        assert_eq!(order.of_points(&line, TOL), Winding::Collinear);
        assert_eq!(order.of_points(&line[..2], TOL), Winding::Collinear);
    }

    #[test]
    fn y_down_flips_the_reported_winding() {
        let [a, b, c, _] = square();
        let up = WindingOrder::counter_clockwise();
        let down = up.with_y_positive_down(true);
        assert_eq!(up.of_points(&[a, b, c], TOL), Winding::CounterClockwise);
        assert_eq!(down.of_points(&[a, b, c], TOL), Winding::Clockwise);
    }

    #[test]
    fn positive_sweep_follows_the_positive_sense() {
        let east = Point::new([1.0, 0.0]);
        let north = Point::new([0.0, 1.0]);

        let ccw = WindingOrder::counter_clockwise();
        assert_relative_eq!(ccw.positive_sweep(east, north), FRAC_PI_2);
        assert_relative_eq!(ccw.positive_sweep(north, east), 3.0 * FRAC_PI_2);

        let cw = WindingOrder::clockwise();
        assert_relative_eq!(cw.positive_sweep(east, north), 3.0 * FRAC_PI_2);

        // Clockwise-positive on a y-down screen is counter-clockwise in math terms.
        let cw_screen = cw.with_y_positive_down(true);
        assert_relative_eq!(cw_screen.positive_sweep(east, north), FRAC_PI_2);
        assert_relative_eq!(ccw.positive_sweep(east, east), 0.0);
    }

    #[test]
    fn positive_turns_agree_with_positive_sweeps() {
        let o = Point::new([0.0, 0.0]);
        let d1 = Point::new([1.0, 0.2]);
        let d2 = Point::new([-0.3, 1.0]);
        for order in [
            WindingOrder::counter_clockwise(),
            WindingOrder::clockwise(),
            WindingOrder::counter_clockwise().with_y_positive_down(true),
            WindingOrder::clockwise().with_y_positive_down(true),
        ] {
            let short_positive_turn = order.positive_sweep(d1, d2) < std::f64::consts::PI;
            assert_eq!(
                order.of_points(&[o, d1, d2], TOL) == order.positive(),
                short_positive_turn,
                "{order}"
            );
        }
    }

    #[test]
    fn display_formats() {
        assert_eq!(
            WindingOrder::default().to_string(),
            "counter-clockwise positive, y up"
        );
        assert_eq!(Winding::Collinear.to_string(), "collinear");
    }
}
