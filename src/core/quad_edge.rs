//! The quad-edge arena and its accessor algebra.
//!
//! This module provides [`QuadEdgeMesh`], the storage for a planar subdivision
//! in the Guibas–Stolfi quad-edge representation, and [`EdgeRef`], the handle
//! through which every directed edge is addressed.
//!
//! # Representation
//!
//! One undirected mesh edge is a *quad-edge*: four directed edges stored
//! together in a single arena slot.
//!
//! | rotation | edge | meaning |
//! |---|---|---|
//! | 0 | `e` | the primal edge, origin to destination |
//! | 1 | `e.rot()` | the dual edge, right face to left face |
//! | 2 | `e.sym()` | the primal edge reversed |
//! | 3 | `e.inv_rot()` | the dual edge reversed |
//!
//! An [`EdgeRef`] is a `(QuadEdgeKey, rotation)` pair, so `rot`, `inv_rot` and
//! `sym` are arithmetic on the rotation modulo 4 and never touch the arena.
//! Each directed edge stores only its `next` edge (the counter-clockwise
//! successor in the ring of edges sharing its origin), its origin point, and
//! optional user data. Destinations are never stored: `dest(e)` is
//! `org(e.sym())`, so an edge and its reverse can never disagree.
//!
//! # Stale references
//!
//! The arena hands out versioned slotmap keys. After
//! [`delete`](QuadEdgeMesh::delete) frees a quad-edge, every `EdgeRef` into it
//! is stale: [`contains_edge`](QuadEdgeMesh::contains_edge) returns `false`,
//! and the editing operators treat it like an absent reference. Raw accessors
//! (`onext`, `org`, ...) require a live reference and panic on a stale one.
//!
//! # Examples
//!
//! ```rust
//! use quadedge::prelude::*;
//!
//! let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
//! let e = mesh.make_edge_with_end_points(Point::new([0.0, 0.0]), Point::new([1.0, 0.0]));
//!
//! assert_eq!(e.rot().rot().rot().rot(), e);
//! assert_eq!(e.sym().sym(), e);
//! assert_eq!(mesh.dest(e), mesh.org(e.sym()));
//!
//! // A fresh edge is alone in both of its origin rings.
//! assert_eq!(mesh.onext(e), e);
//! assert_eq!(mesh.origin_ring(e).count(), 1);
//! ```

#![forbid(unsafe_code)]

use approx::abs_diff_eq;
use slotmap::new_key_type;
use std::fmt;

use crate::core::collections::StorageMap;
use crate::core::config::MeshConfig;
use crate::core::traits::data_type::DataType;
use crate::geometry::point::Point;
use crate::geometry::segment::Segment;

// =============================================================================
// KEYS AND EDGE REFERENCES
// =============================================================================

new_key_type! {
    /// Key type for accessing quad-edges in the arena.
    ///
    /// Each key identifies one group of four directed edges. Keys are
    /// versioned: a key to a deleted quad-edge never resolves to a quad-edge
    /// allocated later in the same slot.
    pub struct QuadEdgeKey;
}

/// Handle to one directed edge: a quad-edge key plus a rotation in `0..4`.
///
/// `EdgeRef` is `Copy`, `Hash` and `Ord`, and compares equal only to a
/// reference to the same directed edge.
///
/// # Examples
///
/// ```rust
/// use quadedge::prelude::*;
///
/// let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
/// let e = mesh.make_edge();
///
/// assert_eq!(e.rot().rot(), e.sym());
/// assert_eq!(e.rot().inv_rot(), e);
/// assert_eq!(e.sym().rot(), e.rot().sym());
/// assert!(e.is_primal());
/// assert!(!e.rot().is_primal());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeRef {
    quad: QuadEdgeKey,
    rotation: u8,
}

impl EdgeRef {
    #[inline]
    const fn new(quad: QuadEdgeKey, rotation: u8) -> Self {
        Self {
            quad,
            rotation: rotation & 3,
        }
    }

    /// The quad-edge this directed edge belongs to.
    #[inline]
    #[must_use]
    pub const fn quad(self) -> QuadEdgeKey {
        self.quad
    }

    /// Position of this edge within its quad-edge, in `0..4`.
    #[inline]
    #[must_use]
    pub const fn rotation(self) -> u8 {
        self.rotation
    }

    /// The dual edge, rotated 90° counter-clockwise: it points from the
    /// right face of `self` to its left face.
    #[inline]
    #[must_use]
    pub const fn rot(self) -> Self {
        Self::new(self.quad, self.rotation + 1)
    }

    /// The dual edge rotated the other way; `e.inv_rot().rot() == e`.
    #[inline]
    #[must_use]
    pub const fn inv_rot(self) -> Self {
        Self::new(self.quad, self.rotation + 3)
    }

    /// The same segment traversed in the opposite direction.
    #[inline]
    #[must_use]
    pub const fn sym(self) -> Self {
        Self::new(self.quad, self.rotation + 2)
    }

    /// Returns `true` for primal edges (rotation 0 or 2), which join
    /// vertices; dual edges join faces.
    #[inline]
    #[must_use]
    pub const fn is_primal(self) -> bool {
        self.rotation % 2 == 0
    }

    /// The rotation-0 edge of the same quad-edge.
    #[inline]
    #[must_use]
    pub const fn canonical(self) -> Self {
        Self::new(self.quad, 0)
    }
}

impl fmt::Debug for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeRef({:?}#{})", self.quad, self.rotation)
    }
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// ARENA RECORDS
// =============================================================================

#[derive(Clone, Debug)]
struct DirectedEdge<E> {
    next: EdgeRef,
    origin: Option<Point>,
    data: Option<E>,
}

/// The four directed edges of one mesh edge, allocated together.
#[derive(Clone, Debug)]
struct QuadEdge<E> {
    edges: [DirectedEdge<E>; 4],
}

impl<E> QuadEdge<E> {
    /// An isolated quad-edge: each primal edge is alone in its origin ring,
    /// and the two dual edges form the single face ring around it.
    fn isolated(key: QuadEdgeKey) -> Self {
        let edge = |next| DirectedEdge {
            next: EdgeRef::new(key, next),
            origin: None,
            data: None,
        };
        Self {
            edges: [edge(0), edge(3), edge(2), edge(1)],
        }
    }
}

// =============================================================================
// MESH
// =============================================================================

/// A planar subdivision stored as an arena of quad-edges.
///
/// `E` is optional per-directed-edge data, opaque to the mesh (see
/// [`DataType`]). The default `()` carries none.
///
/// The mesh is a plain single-owner value: every mutation takes `&mut self`,
/// so exclusive access is enforced by the borrow checker rather than by
/// locks.
#[derive(Clone, Debug)]
pub struct QuadEdgeMesh<E: DataType = ()> {
    quads: StorageMap<QuadEdgeKey, QuadEdge<E>>,
    pub(crate) config: MeshConfig,
}

impl<E: DataType> Default for QuadEdgeMesh<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DataType> QuadEdgeMesh<E> {
    /// Creates an empty mesh with the default [`MeshConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MeshConfig::default())
    }

    /// Creates an empty mesh with the given configuration.
    #[must_use]
    pub fn with_config(config: MeshConfig) -> Self {
        Self {
            quads: StorageMap::with_key(),
            config,
        }
    }

    /// The mesh configuration.
    #[must_use]
    pub const fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Replaces the mesh configuration.
    pub const fn set_config(&mut self, config: MeshConfig) {
        self.config = config;
    }

    /// Number of live quad-edges (undirected mesh edges).
    #[must_use]
    pub fn number_of_quad_edges(&self) -> usize {
        self.quads.len()
    }

    /// Returns `true` if the mesh holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Returns `true` if `e` refers to a live quad-edge. Stale references
    /// (to deleted edges) return `false`.
    #[inline]
    #[must_use]
    pub fn contains_edge(&self, e: EdgeRef) -> bool {
        self.quads.contains_key(e.quad)
    }

    /// One primal directed edge (rotation 0) per live quad-edge.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        self.quads.keys().map(|quad| EdgeRef::new(quad, 0))
    }

    /// Upper bound on the length of any ring in the mesh, used to stop walks
    /// over corrupted rings.
    pub(crate) fn ring_walk_limit(&self) -> usize {
        4 * self.quads.len()
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Allocates a new isolated quad-edge with unset end points and returns
    /// its primal edge.
    pub fn make_edge(&mut self) -> EdgeRef {
        let quad = self.quads.insert_with_key(QuadEdge::isolated);
        EdgeRef::new(quad, 0)
    }

    /// Allocates a new isolated quad-edge running from `org` to `dest`.
    pub fn make_edge_with_end_points(&mut self, org: Point, dest: Point) -> EdgeRef {
        let e = self.make_edge();
        self.set_end_points(e, org, dest);
        e
    }

    /// Removes the quad-edge of `e` from the arena. Returns `false` if it was
    /// already gone. Callers must have unlinked it from every ring first.
    pub(crate) fn remove_quad(&mut self, e: EdgeRef) -> bool {
        self.quads.remove(e.quad).is_some()
    }

    // -------------------------------------------------------------------------
    // Record access
    // -------------------------------------------------------------------------

    #[inline]
    fn record(&self, e: EdgeRef) -> &DirectedEdge<E> {
        &self.quads[e.quad].edges[usize::from(e.rotation)]
    }

    #[inline]
    fn record_mut(&mut self, e: EdgeRef) -> &mut DirectedEdge<E> {
        &mut self.quads[e.quad].edges[usize::from(e.rotation)]
    }

    /// Overwrites the ring successor of `e`. Only Splice rewires rings.
    #[inline]
    pub(crate) fn set_onext(&mut self, e: EdgeRef, next: EdgeRef) {
        self.record_mut(e).next = next;
    }

    // -------------------------------------------------------------------------
    // End points
    // -------------------------------------------------------------------------

    /// The origin of `e`, or `None` if unset.
    ///
    /// # Panics
    ///
    /// Panics if `e` is stale.
    #[inline]
    #[must_use]
    pub fn org(&self, e: EdgeRef) -> Option<Point> {
        self.record(e).origin
    }

    /// The destination of `e`: the origin of `e.sym()`.
    ///
    /// # Panics
    ///
    /// Panics if `e` is stale.
    #[inline]
    #[must_use]
    pub fn dest(&self, e: EdgeRef) -> Option<Point> {
        self.record(e.sym()).origin
    }

    /// Assigns both end points of `e`. The origin of `e.sym()` becomes
    /// `dest` in the same call, so destination and reverse origin always
    /// agree.
    ///
    /// # Panics
    ///
    /// Panics if `e` is stale.
    pub fn set_end_points(&mut self, e: EdgeRef, org: Point, dest: Point) {
        self.record_mut(e).origin = Some(org);
        self.record_mut(e.sym()).origin = Some(dest);
    }

    /// The edge as a line segment, or `None` if an end point is unset.
    #[must_use]
    pub fn segment(&self, e: EdgeRef) -> Option<Segment> {
        Some(Segment::new(self.org(e)?, self.dest(e)?))
    }

    // -------------------------------------------------------------------------
    // Edge data
    // -------------------------------------------------------------------------

    /// The data attached to `e`, if any.
    #[must_use]
    pub fn data(&self, e: EdgeRef) -> Option<E> {
        self.record(e).data
    }

    /// Attaches `data` to `e`, returning the previous value.
    pub fn set_data(&mut self, e: EdgeRef, data: E) -> Option<E> {
        self.record_mut(e).data.replace(data)
    }

    /// Detaches and returns the data of `e`.
    pub fn take_data(&mut self, e: EdgeRef) -> Option<E> {
        self.record_mut(e).data.take()
    }

    // -------------------------------------------------------------------------
    // Ring navigation
    // -------------------------------------------------------------------------

    /// Next edge counter-clockwise around the origin of `e`.
    ///
    /// # Panics
    ///
    /// Panics if `e` is stale. The same holds for every navigation accessor.
    #[inline]
    #[must_use]
    pub fn onext(&self, e: EdgeRef) -> EdgeRef {
        self.record(e).next
    }

    /// Next edge clockwise around the origin of `e`.
    #[inline]
    #[must_use]
    pub fn oprev(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.rot()).rot()
    }

    /// Next edge counter-clockwise around the destination of `e`.
    #[inline]
    #[must_use]
    pub fn dnext(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.sym()).sym()
    }

    /// Next edge clockwise around the destination of `e`.
    #[inline]
    #[must_use]
    pub fn dprev(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.inv_rot()).inv_rot()
    }

    /// Next edge counter-clockwise around the left face of `e`.
    #[inline]
    #[must_use]
    pub fn lnext(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.inv_rot()).rot()
    }

    /// Previous edge around the left face of `e`.
    #[inline]
    #[must_use]
    pub fn lprev(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e).sym()
    }

    /// Next edge counter-clockwise around the right face of `e`.
    #[inline]
    #[must_use]
    pub fn rnext(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.rot()).inv_rot()
    }

    /// Previous edge around the right face of `e`.
    #[inline]
    #[must_use]
    pub fn rprev(&self, e: EdgeRef) -> EdgeRef {
        self.onext(e.sym())
    }

    /// Iterates the origin ring of `e`, starting with `e` itself.
    ///
    /// Iteration stops when the ring closes, when it would step onto a stale
    /// reference, or after as many steps as the arena holds directed edges.
    /// A stale `e` yields nothing.
    #[must_use]
    pub fn origin_ring(&self, e: EdgeRef) -> RingIter<'_, E> {
        RingIter::new(self, e, RingKind::Origin)
    }

    /// Iterates the left-face ring of `e`, starting with `e` itself.
    ///
    /// Same termination rules as [`origin_ring`](Self::origin_ring).
    #[must_use]
    pub fn left_face_ring(&self, e: EdgeRef) -> RingIter<'_, E> {
        RingIter::new(self, e, RingKind::LeftFace)
    }

    /// Finds the edge in the origin ring of `e` whose destination equals
    /// `dest`, within the configured tolerance.
    #[must_use]
    pub fn find_onext_dest(&self, e: EdgeRef, dest: Point) -> Option<EdgeRef> {
        let tolerance = self.config.tolerance;
        self.origin_ring(e).find(|&candidate| {
            self.dest(candidate)
                .is_some_and(|d| abs_diff_eq!(d, dest, epsilon = tolerance))
        })
    }
}

// =============================================================================
// RING ITERATION
// =============================================================================

/// Which ring a [`RingIter`] walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RingKind {
    /// Edges sharing an origin, counter-clockwise (`onext`).
    Origin,
    /// Edges bounding a left face, counter-clockwise (`lnext`).
    LeftFace,
}

impl fmt::Display for RingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin ring"),
            Self::LeftFace => write!(f, "left-face ring"),
        }
    }
}

/// Iterator over one ring of a [`QuadEdgeMesh`]. See
/// [`QuadEdgeMesh::origin_ring`].
#[derive(Clone, Debug)]
pub struct RingIter<'a, E: DataType> {
    mesh: &'a QuadEdgeMesh<E>,
    start: EdgeRef,
    upcoming: Option<EdgeRef>,
    kind: RingKind,
    remaining: usize,
}

impl<'a, E: DataType> RingIter<'a, E> {
    fn new(mesh: &'a QuadEdgeMesh<E>, start: EdgeRef, kind: RingKind) -> Self {
        Self {
            mesh,
            start,
            upcoming: mesh.contains_edge(start).then_some(start),
            kind,
            remaining: mesh.ring_walk_limit(),
        }
    }
}

impl<E: DataType> Iterator for RingIter<'_, E> {
    type Item = EdgeRef;

    fn next(&mut self) -> Option<EdgeRef> {
        let current = self.upcoming.take()?;
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let following = match self.kind {
            RingKind::Origin => self.mesh.onext(current),
            RingKind::LeftFace => self.mesh.lnext(current),
        };
        if following != self.start && self.mesh.contains_edge(following) {
            self.upcoming = Some(following);
        }
        Some(current)
    }
}
