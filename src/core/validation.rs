//! Structural validation of quad-edge rings.
//!
//! The validator is a read-only pass over the arena. It never runs on its
//! own: tests and diagnostics call [`validate`] or [`validate_all`]
//! explicitly, and strict mode (see [`MeshConfig`]) runs it after each
//! editing operator.
//!
//! Starting from one directed edge, [`validate`] walks the origin ring of
//! that edge and the left-face ring of every ring member, and checks:
//!
//! - the rotation algebra of each quad-edge (`rot⁴ = id`, `sym² = id`),
//! - the primal/dual link `rot(onext(rot(onext(e)))) = e` that Splice
//!   preserves,
//! - that the origin ring closes without revisiting an edge or stepping onto
//!   a stale reference,
//! - that ring members share the origin, have both end points set, and lead
//!   to distinct destinations,
//! - that every left-face ring closes and each edge starts where its
//!   predecessor ends,
//! - that at most one of the faces around the origin winds against the
//!   positive sense (the outer face of the component),
//! - that consecutive ring members turn in the positive sense of the
//!   requested [`WindingOrder`] and go around exactly once.
//!
//! Violations are collected into a [`QuadEdgeValidationReport`] in the
//! order they are found; an empty report means the rings are consistent.
//!
//! [`MeshConfig`]: crate::core::config::MeshConfig

#![forbid(unsafe_code)]

use approx::abs_diff_eq;
use std::f64::consts::{PI, TAU};
use std::fmt;
use thiserror::Error;

use crate::core::collections::{FastHashMap, FastHashSet, RING_BUFFER_SIZE, SmallBuffer};
use crate::core::quad_edge::{EdgeRef, QuadEdgeMesh};
use crate::core::traits::data_type::DataType;
use crate::geometry::point::Point;
use crate::geometry::winding::{Winding, WindingOrder};

// =============================================================================
// REPORT TYPES
// =============================================================================

/// Classifies a [`RingViolation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RingInvariant {
    /// Four rotations do not return to the starting edge.
    RotationClosure,
    /// Reversing twice does not return to the starting edge.
    SymmetricInvolution,
    /// `rot(onext(rot(onext(e))))` differs from `e`.
    DualRingConsistency,
    /// A ring steps onto, or starts from, a deleted quad-edge.
    StaleReference,
    /// The origin ring revisits an edge before returning to its start.
    OriginRingClosure,
    /// A ring member has an unset end point.
    MissingEndpoint,
    /// A ring member does not share the origin of the start edge.
    OriginConsistency,
    /// Two ring members lead to the same destination.
    DuplicateDestination,
    /// The left-face ring revisits an edge before returning to its start.
    LeftFaceClosure,
    /// A left-face successor does not start where its predecessor ends.
    LeftFaceContinuity,
    /// More than one face around an origin winds against the positive sense.
    FaceOrientation,
    /// The origin ring is not sorted in the positive sense of the winding
    /// order, or winds around its origin more than once.
    RotationalOrder,
}

impl fmt::Display for RingInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RotationClosure => "rotation closure",
            Self::SymmetricInvolution => "symmetric involution",
            Self::DualRingConsistency => "dual ring consistency",
            Self::StaleReference => "stale reference",
            Self::OriginRingClosure => "origin ring closure",
            Self::MissingEndpoint => "missing end point",
            Self::OriginConsistency => "origin consistency",
            Self::DuplicateDestination => "duplicate destination",
            Self::LeftFaceClosure => "left face closure",
            Self::LeftFaceContinuity => "left face continuity",
            Self::FaceOrientation => "face orientation",
            Self::RotationalOrder => "rotational order",
        };
        f.write_str(name)
    }
}

/// A single invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingViolation {
    /// Which invariant failed.
    pub kind: RingInvariant,
    /// The edge at which the failure was detected.
    pub edge: EdgeRef,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for RingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.edge, self.message)
    }
}

/// Ordered collection of the violations found by one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuadEdgeValidationReport {
    /// Violations in the order they were detected.
    pub violations: Vec<RingViolation>,
}

impl QuadEdgeValidationReport {
    /// Returns `true` if no violations were recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.violations.len()
    }

    /// The violations rendered as strings.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Returns `true` if any violation has the given kind.
    #[must_use]
    pub fn contains(&self, kind: RingInvariant) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    /// Converts the report into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadEdgeValidationError`] if the report is non-empty.
    pub fn into_result(self) -> Result<(), QuadEdgeValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(QuadEdgeValidationError { report: self })
        }
    }

    fn push(&mut self, kind: RingInvariant, edge: EdgeRef, message: String) {
        self.violations.push(RingViolation {
            kind,
            edge,
            message,
        });
    }
}

impl fmt::Display for QuadEdgeValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// A validation pass found at least one violation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Quad-edge validation failed with {} violation(s): {report}", .report.len())]
pub struct QuadEdgeValidationError {
    /// The full report.
    pub report: QuadEdgeValidationReport,
}

/// Optional checks for [`validate_with_options`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Check that origin rings are sorted in the positive sense and wind
    /// exactly once.
    pub check_rotational_order: bool,
    /// Walk the left-face ring of every origin-ring member and check that at
    /// most one of those faces winds against the positive sense.
    pub check_left_faces: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_rotational_order: true,
            check_left_faces: true,
        }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Validates the rings reachable from `start` with every check enabled.
///
/// # Examples
///
/// ```rust
/// use quadedge::prelude::*;
///
/// let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
/// let a = mesh.make_edge_with_end_points(Point::new([0.0, 0.0]), Point::new([1.0, 0.0]));
/// let b = mesh.make_edge_with_end_points(Point::new([1.0, 0.0]), Point::new([0.0, 1.0]));
/// mesh.splice(a.sym(), b);
/// mesh.connect(b, a, WindingOrder::default());
///
/// let report = validate(&mesh, a, WindingOrder::default());
/// assert!(report.is_empty(), "{report}");
/// ```
#[must_use]
pub fn validate<E: DataType>(
    mesh: &QuadEdgeMesh<E>,
    start: EdgeRef,
    order: WindingOrder,
) -> QuadEdgeValidationReport {
    validate_with_options(mesh, start, order, ValidationOptions::default())
}

/// Validates the rings reachable from `start` with the given options.
#[must_use]
pub fn validate_with_options<E: DataType>(
    mesh: &QuadEdgeMesh<E>,
    start: EdgeRef,
    order: WindingOrder,
    options: ValidationOptions,
) -> QuadEdgeValidationReport {
    let mut validator = RingValidator::new(mesh, order, options);
    validator.check_origin_ring(start);
    validator.report
}

/// Validates every origin ring in the mesh, each exactly once.
#[must_use]
pub fn validate_all<E: DataType>(
    mesh: &QuadEdgeMesh<E>,
    order: WindingOrder,
) -> QuadEdgeValidationReport {
    let mut validator = RingValidator::new(mesh, order, ValidationOptions::default());
    let mut rings_seen: FastHashSet<EdgeRef> = FastHashSet::default();
    for e in mesh.edges() {
        for start in [e, e.sym()] {
            if rings_seen.contains(&start) {
                continue;
            }
            rings_seen.extend(mesh.origin_ring(start));
            validator.check_origin_ring(start);
        }
    }
    validator.report
}

impl<E: DataType> QuadEdgeMesh<E> {
    /// Validates the whole mesh with [`validate_all`], returning the report.
    #[must_use]
    pub fn validation_report(&self, order: WindingOrder) -> QuadEdgeValidationReport {
        validate_all(self, order)
    }

    /// Validates the whole mesh.
    ///
    /// # Errors
    ///
    /// Returns [`QuadEdgeValidationError`] carrying every violation found.
    pub fn is_valid(&self, order: WindingOrder) -> Result<(), QuadEdgeValidationError> {
        self.validation_report(order).into_result()
    }
}

// =============================================================================
// RING WALKER
// =============================================================================

type Ring = SmallBuffer<EdgeRef, RING_BUFFER_SIZE>;

struct RingValidator<'a, E: DataType> {
    mesh: &'a QuadEdgeMesh<E>,
    order: WindingOrder,
    options: ValidationOptions,
    tolerance: f64,
    faces_seen: FastHashSet<EdgeRef>,
    /// Winding of each closed left face, keyed by every member edge; the
    /// value carries the edge the face walk started from.
    face_windings: FastHashMap<EdgeRef, (EdgeRef, Winding)>,
    report: QuadEdgeValidationReport,
}

impl<'a, E: DataType> RingValidator<'a, E> {
    fn new(mesh: &'a QuadEdgeMesh<E>, order: WindingOrder, options: ValidationOptions) -> Self {
        Self {
            mesh,
            order,
            options,
            tolerance: mesh.config().tolerance,
            faces_seen: FastHashSet::default(),
            face_windings: FastHashMap::default(),
            report: QuadEdgeValidationReport::default(),
        }
    }

    fn check_origin_ring(&mut self, start: EdgeRef) {
        if !self.mesh.contains_edge(start) {
            self.report.push(
                RingInvariant::StaleReference,
                start,
                "start edge refers to a deleted quad-edge".to_string(),
            );
            return;
        }

        let (ring, closed) = self.walk_origin_ring(start);
        for &r in &ring {
            self.check_algebra(r);
        }

        // Dual starts have face rings as origin rings and carry no points.
        if !start.is_primal() {
            return;
        }

        let Some(spokes) = self.check_end_points(start, &ring) else {
            return;
        };
        if self.options.check_left_faces {
            for &r in &ring {
                self.check_left_face(r);
            }
            self.check_face_orientation(start, &ring);
        }
        if self.options.check_rotational_order && closed {
            self.check_rotational_order(&ring, &spokes);
        }
    }

    /// Follows `onext` from `start`. Returns the members visited and whether
    /// the walk came back to `start`.
    fn walk_origin_ring(&mut self, start: EdgeRef) -> (Ring, bool) {
        let mut ring = Ring::new();
        let mut seen: FastHashSet<EdgeRef> = FastHashSet::default();
        let mut current = start;
        loop {
            seen.insert(current);
            ring.push(current);
            let next = self.mesh.onext(current);
            if next == start {
                return (ring, true);
            }
            if !self.mesh.contains_edge(next) {
                self.report.push(
                    RingInvariant::StaleReference,
                    current,
                    format!("onext leads to deleted edge {next}"),
                );
                return (ring, false);
            }
            if seen.contains(&next) {
                self.report.push(
                    RingInvariant::OriginRingClosure,
                    current,
                    format!(
                        "onext revisits {next} after {} step(s) without returning to {start}",
                        ring.len()
                    ),
                );
                return (ring, false);
            }
            current = next;
        }
    }

    fn check_algebra(&mut self, e: EdgeRef) {
        if e.rot().rot().rot().rot() != e {
            self.report.push(
                RingInvariant::RotationClosure,
                e,
                "rot applied four times does not return to the edge".to_string(),
            );
        }
        if e.sym().sym() != e {
            self.report.push(
                RingInvariant::SymmetricInvolution,
                e,
                "sym applied twice does not return to the edge".to_string(),
            );
        }

        let next = self.mesh.onext(e);
        if !self.mesh.contains_edge(next) {
            return;
        }
        let dual = self.mesh.onext(next.rot());
        if !self.mesh.contains_edge(dual) {
            self.report.push(
                RingInvariant::StaleReference,
                next.rot(),
                format!("dual onext leads to deleted edge {dual}"),
            );
            return;
        }
        if dual.rot() != e {
            self.report.push(
                RingInvariant::DualRingConsistency,
                e,
                format!("rot(onext(rot(onext(e)))) is {}", dual.rot()),
            );
        }
    }

    /// Checks origins and destinations of the ring. Returns the direction of
    /// each member from the shared origin when all end points are usable.
    fn check_end_points(
        &mut self,
        start: EdgeRef,
        ring: &Ring,
    ) -> Option<SmallBuffer<Point, RING_BUFFER_SIZE>> {
        let mesh = self.mesh;
        let tolerance = self.tolerance;
        let Some(origin) = mesh.org(start) else {
            self.report.push(
                RingInvariant::MissingEndpoint,
                start,
                "origin is unset".to_string(),
            );
            return None;
        };

        let mut usable = true;
        let mut destinations: SmallBuffer<(EdgeRef, Point), RING_BUFFER_SIZE> = SmallBuffer::new();
        for &r in ring {
            match mesh.org(r) {
                None => {
                    self.report
                        .push(RingInvariant::MissingEndpoint, r, "origin is unset".to_string());
                    usable = false;
                }
                Some(org) if !abs_diff_eq!(org, origin, epsilon = tolerance) => {
                    self.report.push(
                        RingInvariant::OriginConsistency,
                        r,
                        format!("origin {org} differs from ring origin {origin}"),
                    );
                    usable = false;
                }
                Some(_) => {}
            }

            let Some(dest) = mesh.dest(r) else {
                self.report.push(
                    RingInvariant::MissingEndpoint,
                    r,
                    "destination is unset".to_string(),
                );
                usable = false;
                continue;
            };
            if let Some(&(other, _)) = destinations
                .iter()
                .find(|(_, d)| abs_diff_eq!(*d, dest, epsilon = tolerance))
            {
                self.report.push(
                    RingInvariant::DuplicateDestination,
                    r,
                    format!("{other} already leads to {dest}"),
                );
                usable = false;
            }
            destinations.push((r, dest));
        }

        usable.then(|| destinations.iter().map(|&(_, d)| d - origin).collect())
    }

    fn check_left_face(&mut self, start: EdgeRef) {
        if !self.faces_seen.insert(start) {
            return;
        }
        let mesh = self.mesh;
        let tolerance = self.tolerance;
        let mut face = Ring::new();
        let mut corners: SmallBuffer<Point, RING_BUFFER_SIZE> = SmallBuffer::new();
        let mut consistent = true;
        let mut current = start;
        loop {
            face.push(current);
            match mesh.org(current) {
                Some(org) => corners.push(org),
                None => consistent = false,
            }
            let next = mesh.lnext(current);
            if !mesh.contains_edge(next) {
                self.report.push(
                    RingInvariant::StaleReference,
                    current,
                    format!("lnext leads to deleted edge {next}"),
                );
                return;
            }
            if let (Some(dest), Some(org)) = (mesh.dest(current), mesh.org(next)) {
                if !abs_diff_eq!(dest, org, epsilon = tolerance) {
                    self.report.push(
                        RingInvariant::LeftFaceContinuity,
                        current,
                        format!("ends at {dest} but lnext {next} starts at {org}"),
                    );
                    consistent = false;
                }
            }
            if next == start {
                break;
            }
            if !self.faces_seen.insert(next) {
                self.report.push(
                    RingInvariant::LeftFaceClosure,
                    current,
                    format!(
                        "lnext revisits {next} after {} step(s) without returning to {start}",
                        face.len()
                    ),
                );
                return;
            }
            current = next;
        }

        if consistent {
            let winding = self.order.of_points(&corners, tolerance);
            for &member in &face {
                self.face_windings.insert(member, (start, winding));
            }
        }
    }

    /// Bounded faces wind in the positive sense and the outer face of a
    /// connected component winds against it, so an origin touches at most one
    /// reversed face.
    fn check_face_orientation(&mut self, start: EdgeRef, ring: &Ring) {
        let reversed = self.order.positive().reversed();
        let mut reversed_faces: SmallBuffer<EdgeRef, RING_BUFFER_SIZE> = SmallBuffer::new();
        for r in ring {
            if let Some(&(face, winding)) = self.face_windings.get(r) {
                if winding == reversed && !reversed_faces.contains(&face) {
                    reversed_faces.push(face);
                }
            }
        }
        if reversed_faces.len() > 1 {
            self.report.push(
                RingInvariant::FaceOrientation,
                start,
                format!(
                    "{} faces around the origin wind {reversed} ({})",
                    reversed_faces.len(),
                    self.order
                ),
            );
        }
    }

    fn check_rotational_order(&mut self, ring: &Ring, spokes: &[Point]) {
        if ring.len() < 2 {
            return;
        }
        let order = self.order;
        let mut total = 0.0;
        for (i, (&from, &to)) in spokes.iter().zip(spokes.iter().cycle().skip(1)).enumerate() {
            let sweep = order.positive_sweep(from, to);
            if sweep <= 0.0 {
                self.report.push(
                    RingInvariant::RotationalOrder,
                    ring[i],
                    format!("{} points the same way", ring[(i + 1) % ring.len()]),
                );
                return;
            }
            total += sweep;
        }
        // Each sweep lies in (0, 2π), so the total is a whole number of turns
        // up to rounding.
        if (total - TAU).abs() >= PI {
            self.report.push(
                RingInvariant::RotationalOrder,
                ring[0],
                format!(
                    "ring of {} edges winds {:.0} times around its origin ({order})",
                    ring.len(),
                    (total / TAU).round()
                ),
            );
        }
    }
}
