//! Topological editing operators: Splice, Connect, Swap and Delete.
//!
//! Every change to the ring structure of a [`QuadEdgeMesh`] goes through
//! [`splice`](QuadEdgeMesh::splice). The other operators are short sequences
//! of splices plus end-point assignment:
//!
//! - [`connect`](QuadEdgeMesh::connect) adds an edge closing a face,
//! - [`swap`](QuadEdgeMesh::swap) flips the diagonal of a quadrilateral,
//! - [`delete`](QuadEdgeMesh::delete) unlinks an edge and frees its slot.
//!
//! Absent (stale) references never panic here: Splice, Swap and Delete do
//! nothing, and Connect returns `None`.
//!
//! When [`MeshConfig::strict`](crate::core::config::MeshConfig::strict) is
//! set, Connect, Swap and Delete validate the rings they touched afterwards
//! and log every violation through `tracing`.

#![forbid(unsafe_code)]

use approx::abs_diff_eq;
use std::f64::consts::TAU;
use thiserror::Error;

use crate::core::collections::{RING_BUFFER_SIZE, SmallBuffer};
use crate::core::quad_edge::{EdgeRef, QuadEdgeMesh};
use crate::core::traits::data_type::DataType;
use crate::core::validation::validate;
use crate::geometry::point::Point;
use crate::geometry::winding::WindingOrder;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors from resolving an edge against a target point.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum QuadEdgeError {
    /// The edge reference points to a deleted quad-edge.
    #[error("Edge {edge} is stale: its quad-edge was deleted")]
    StaleReference {
        /// The stale reference.
        edge: EdgeRef,
    },
    /// An edge in the walked ring has an unset end point.
    #[error("Edge {edge} has an unset end point")]
    MissingEndpoint {
        /// The edge missing an end point.
        edge: EdgeRef,
    },
    /// An edge of the ring already ends at the target.
    #[error("Edge {edge} already ends at {target}")]
    CoincidentEdge {
        /// The existing edge.
        edge: EdgeRef,
        /// The requested target.
        target: Point,
    },
    /// No angular sector of the ring contains the target.
    #[error("No sector of the origin ring of {edge} contains {target} ({order})")]
    UnresolvedTarget {
        /// The edge whose origin ring was walked.
        edge: EdgeRef,
        /// The requested target.
        target: Point,
        /// The winding order the ring was expected to follow.
        order: WindingOrder,
    },
}

// =============================================================================
// OPERATORS
// =============================================================================

impl<E: DataType> QuadEdgeMesh<E> {
    /// Merges or splits the origin rings of `a` and `b`, and at the same time
    /// the left-face rings of their duals.
    ///
    /// If `a` and `b` lie in different origin rings the rings merge; if they
    /// lie in the same ring it splits in two. Applying the same splice twice
    /// restores the original rings. A stale `a` or `b` makes this a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quadedge::prelude::*;
    ///
    /// let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
    /// let a = mesh.make_edge();
    /// let b = mesh.make_edge();
    ///
    /// mesh.splice(a, b);
    /// assert_eq!(mesh.origin_ring(a).count(), 2);
    ///
    /// mesh.splice(a, b);
    /// assert_eq!(mesh.origin_ring(a).count(), 1);
    /// assert_eq!(mesh.origin_ring(b).count(), 1);
    /// ```
    pub fn splice(&mut self, a: EdgeRef, b: EdgeRef) {
        if !(self.contains_edge(a) && self.contains_edge(b)) {
            tracing::trace!("splice({a}, {b}): absent reference, skipped");
            return;
        }

        let alpha = self.onext(a).rot();
        let beta = self.onext(b).rot();

        // Every successor is read before any is written.
        let a_next = self.onext(a);
        let b_next = self.onext(b);
        let alpha_next = self.onext(alpha);
        let beta_next = self.onext(beta);

        self.set_onext(a, b_next);
        self.set_onext(b, a_next);
        self.set_onext(alpha, beta_next);
        self.set_onext(beta, alpha_next);

        tracing::trace!("splice({a}, {b})");
    }

    /// Adds a new edge from the destination of `a` to the origin of `b`, so
    /// that `a`, the new edge and `b` bound the same left face.
    ///
    /// The new edge is linked into the origin ring of `b` at the angular
    /// position [`resolve_edge`](Self::resolve_edge) picks for `order`. If
    /// resolution fails the edge is linked directly after `b` and a warning
    /// is logged.
    ///
    /// Returns `None`, and changes nothing, if `a` or `b` is stale.
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
    ///
    /// let c = mesh.connect(b, a, WindingOrder::counter_clockwise()).unwrap();
    /// assert_eq!(mesh.org(c), mesh.dest(b));
    /// assert_eq!(mesh.dest(c), mesh.org(a));
    /// assert_eq!(mesh.left_face_ring(a).count(), 3);
    /// ```
    pub fn connect(&mut self, a: EdgeRef, b: EdgeRef, order: WindingOrder) -> Option<EdgeRef> {
        if !(self.contains_edge(a) && self.contains_edge(b)) {
            tracing::debug!("connect({a}, {b}): absent reference, nothing to connect");
            return None;
        }

        let anchor = match self.dest(a) {
            Some(target) => self.resolve_edge(order, b, target).unwrap_or_else(|err| {
                tracing::warn!("connect({a}, {b}): {err}; linking after {b}");
                b
            }),
            None => {
                tracing::warn!("connect({a}, {b}): {a} has no destination; linking after {b}");
                b
            }
        };

        let e = self.make_edge();
        if let (Some(org), Some(dest)) = (self.dest(a), self.org(anchor)) {
            self.set_end_points(e, org, dest);
        }
        let a_lnext = self.lnext(a);
        self.splice(e, a_lnext);
        self.splice(e.sym(), anchor);

        tracing::debug!("connect({a}, {b}) -> {e} via {anchor}");
        self.audit("connect", order, &[a, e, e.sym(), anchor]);
        Some(e)
    }

    /// Flips `e` to the other diagonal of the quadrilateral formed by its two
    /// adjacent triangles.
    ///
    /// `e` must be an interior edge with a triangle on each side. Swapping
    /// twice yields the original diagonal traversed in the opposite
    /// direction; four swaps restore `e` exactly. A stale `e` is a no-op.
    pub fn swap(&mut self, e: EdgeRef) {
        if !self.contains_edge(e) {
            tracing::debug!("swap({e}): absent reference, skipped");
            return;
        }

        let a = self.oprev(e);
        let b = self.oprev(e.sym());

        self.splice(e, a);
        self.splice(e.sym(), b);
        let a_lnext = self.lnext(a);
        self.splice(e, a_lnext);
        let b_lnext = self.lnext(b);
        self.splice(e.sym(), b_lnext);

        match (self.dest(a), self.dest(b)) {
            (Some(org), Some(dest)) => self.set_end_points(e, org, dest),
            _ => tracing::warn!("swap({e}): quadrilateral corner unset, end points kept"),
        }

        tracing::debug!("swap({e}) -> {:?} to {:?}", self.org(e), self.dest(e));
        self.audit("swap", self.config.winding, &[e, e.sym(), a, b]);
    }

    /// Unlinks `e` (and `e.sym()`) from both origin rings and frees its
    /// quad-edge. References to it become stale. A stale `e` is a no-op.
    pub fn delete(&mut self, e: EdgeRef) {
        if !self.contains_edge(e) {
            tracing::debug!("delete({e}): absent reference, skipped");
            return;
        }

        let org_neighbor = self.oprev(e);
        let dest_neighbor = self.oprev(e.sym());
        self.splice(e, org_neighbor);
        self.splice(e.sym(), dest_neighbor);
        self.remove_quad(e);

        tracing::debug!("delete({e})");
        self.audit(
            "delete",
            self.config.winding,
            &[org_neighbor, dest_neighbor],
        );
    }

    /// Finds the edge of the origin ring of `e` after which an edge toward
    /// `target` belongs.
    ///
    /// Returns the ring edge `r` such that the direction toward `target`
    /// lies strictly inside the positive-sense sector from `r` to
    /// `onext(r)`, where `order` defines the positive sense. A ring of one
    /// edge resolves to that edge.
    ///
    /// # Errors
    ///
    /// - [`QuadEdgeError::StaleReference`] if `e` is stale.
    /// - [`QuadEdgeError::MissingEndpoint`] if an edge of the ring has an
    ///   unset end point.
    /// - [`QuadEdgeError::CoincidentEdge`] if an edge of the ring already
    ///   ends at `target`.
    /// - [`QuadEdgeError::UnresolvedTarget`] if no sector strictly contains
    ///   `target`, as when `target` lies along an existing edge.
    pub fn resolve_edge(
        &self,
        order: WindingOrder,
        e: EdgeRef,
        target: Point,
    ) -> Result<EdgeRef, QuadEdgeError> {
        if !self.contains_edge(e) {
            return Err(QuadEdgeError::StaleReference { edge: e });
        }
        let origin = self
            .org(e)
            .ok_or(QuadEdgeError::MissingEndpoint { edge: e })?;
        let tolerance = self.config.tolerance;

        let mut spokes: SmallBuffer<(EdgeRef, Point), RING_BUFFER_SIZE> = SmallBuffer::new();
        for r in self.origin_ring(e) {
            let dest = self
                .dest(r)
                .ok_or(QuadEdgeError::MissingEndpoint { edge: r })?;
            if abs_diff_eq!(dest, target, epsilon = tolerance) {
                return Err(QuadEdgeError::CoincidentEdge { edge: r, target });
            }
            spokes.push((r, dest - origin));
        }
        if spokes.len() == 1 {
            return Ok(e);
        }

        let toward = target - origin;
        spokes
            .iter()
            .zip(spokes.iter().cycle().skip(1))
            .find_map(|(&(r, from), &(_, to))| {
                let mut sector = order.positive_sweep(from, to);
                if sector <= 0.0 {
                    sector = TAU;
                }
                let sweep = order.positive_sweep(from, toward);
                (sweep > 0.0 && sweep < sector).then_some(r)
            })
            .ok_or(QuadEdgeError::UnresolvedTarget {
                edge: e,
                target,
                order,
            })
    }

    /// Strict mode: validate the rings around `touched` and log violations.
    fn audit(&self, operation: &str, order: WindingOrder, touched: &[EdgeRef]) {
        if !self.config.strict {
            return;
        }
        for &edge in touched.iter().filter(|&&edge| self.contains_edge(edge)) {
            let report = validate(self, edge, order);
            for violation in &report.violations {
                tracing::warn!("[strict] {operation}: {violation}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MeshConfigBuilder;

    fn p(x: f64, y: f64) -> Point {
        Point::new([x, y])
    }

    /// Edges out of the origin at the given angles (degrees), spliced into
    /// one counter-clockwise origin ring.
    fn star(mesh: &mut QuadEdgeMesh, degrees: &[f64]) -> Vec<EdgeRef> {
        let spokes: Vec<EdgeRef> = degrees
            .iter()
            .map(|d| {
                let (s, c) = d.to_radians().sin_cos();
                mesh.make_edge_with_end_points(p(0.0, 0.0), p(c, s))
            })
            .collect();
        for pair in spokes.windows(2) {
            mesh.splice(pair[0], pair[1]);
        }
        spokes
    }

    #[test]
    fn splice_merges_then_splits() {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        let a = mesh.make_edge();
        let b = mesh.make_edge();

        mesh.splice(a, b);
        assert_eq!(mesh.onext(a), b);
        assert_eq!(mesh.onext(b), a);
        assert_eq!(mesh.origin_ring(b).count(), 2);

        mesh.splice(a, b);
        assert_eq!(mesh.onext(a), a);
        assert_eq!(mesh.onext(b), b);
        assert_eq!(mesh.onext(a.rot()), a.inv_rot());
        assert_eq!(mesh.onext(b.rot()), b.inv_rot());
    }

    #[test]
    fn splice_with_stale_reference_is_noop() {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        let a = mesh.make_edge();
        let gone = mesh.make_edge();
        mesh.delete(gone);

        mesh.splice(a, gone);
        mesh.splice(gone, a);
        assert_eq!(mesh.onext(a), a);
        assert_eq!(mesh.number_of_quad_edges(), 1);
    }

    #[test]
    fn star_builds_counter_clockwise_ring() {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        let spokes = star(&mut mesh, &[0.0, 90.0, 180.0]);
        let ring: Vec<_> = mesh.origin_ring(spokes[0]).collect();
        assert_eq!(ring, vec![spokes[0], spokes[1], spokes[2]]);
    }

    #[test]
    fn resolve_edge_picks_the_containing_sector() {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        let spokes = star(&mut mesh, &[0.0, 90.0, 180.0]);
        let order = WindingOrder::counter_clockwise();

        assert_eq!(mesh.resolve_edge(order, spokes[0], p(1.0, 1.0)), Ok(spokes[0]));
        assert_eq!(mesh.resolve_edge(order, spokes[2], p(-1.0, 1.0)), Ok(spokes[1]));
        assert_eq!(mesh.resolve_edge(order, spokes[1], p(0.0, -1.0)), Ok(spokes[2]));
    }

    #[test]
    fn resolve_edge_reports_errors() {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        let spokes = star(&mut mesh, &[0.0, 90.0]);
        let order = WindingOrder::counter_clockwise();

        assert_eq!(
            mesh.resolve_edge(order, spokes[0], p(0.0, 1.0)),
            Err(QuadEdgeError::CoincidentEdge {
                edge: spokes[1],
                target: p(0.0, 1.0),
            })
        );

        let bare = mesh.make_edge();
        assert_eq!(
            mesh.resolve_edge(order, bare, p(1.0, 1.0)),
            Err(QuadEdgeError::MissingEndpoint { edge: bare })
        );

        mesh.delete(bare);
        assert_eq!(
            mesh.resolve_edge(order, bare, p(1.0, 1.0)),
            Err(QuadEdgeError::StaleReference { edge: bare })
        );
    }

    #[test]
    fn resolve_edge_rejects_target_along_existing_edge() {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        let spokes = star(&mut mesh, &[0.0, 120.0, 240.0]);
        // Same direction as the first spoke, but farther out: it sits on a
        // sector boundary rather than strictly inside a sector.
        let err = mesh
            .resolve_edge(WindingOrder::counter_clockwise(), spokes[1], p(2.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, QuadEdgeError::UnresolvedTarget { .. }));
        assert!(err.to_string().contains("counter-clockwise positive"));
    }

    #[test]
    fn connect_with_stale_reference_returns_none() {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        let a = mesh.make_edge_with_end_points(p(0.0, 0.0), p(1.0, 0.0));
        let b = mesh.make_edge_with_end_points(p(1.0, 0.0), p(0.0, 1.0));
        mesh.delete(b);

        assert_eq!(mesh.connect(a, b, WindingOrder::default()), None);
        assert_eq!(mesh.connect(b, a, WindingOrder::default()), None);
        assert_eq!(mesh.number_of_quad_edges(), 1);
    }

    #[test]
    fn delete_isolated_edge_frees_slot() {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        let e = mesh.make_edge();
        mesh.delete(e);
        assert!(mesh.is_empty());
        assert!(!mesh.contains_edge(e));
        // Deleting twice is harmless.
        mesh.delete(e);
        mesh.swap(e);
        assert!(mesh.is_empty());
    }

    #[test]
    fn delete_shrinks_shared_ring() {
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
        let spokes = star(&mut mesh, &[0.0, 90.0, 180.0]);
        mesh.delete(spokes[1]);
        let ring: Vec<_> = mesh.origin_ring(spokes[0]).collect();
        assert_eq!(ring, vec![spokes[0], spokes[2]]);
    }

    #[test]
    fn strict_mode_operations_still_apply() {
        let config = MeshConfigBuilder::default().strict(true).build().unwrap();
        let mut mesh: QuadEdgeMesh = QuadEdgeMesh::with_config(config);
        let a = mesh.make_edge_with_end_points(p(0.0, 0.0), p(1.0, 0.0));
        let b = mesh.make_edge_with_end_points(p(1.0, 0.0), p(0.0, 1.0));
        mesh.splice(a.sym(), b);

        let c = mesh.connect(b, a, WindingOrder::default()).unwrap();
        assert_eq!(mesh.lnext(a), b);
        assert_eq!(mesh.lnext(b), c);
        assert_eq!(mesh.lnext(c), a);
    }
}
