//! # quadedge
//!
//! A planar subdivision core built on the Guibas–Stolfi quad-edge structure,
//! the topology engine underneath 2D Delaunay and constrained triangulators.
//!
//! # Features
//!
//! - Quad-edge arena with O(1) accessor algebra (`rot`, `sym`, `onext`,
//!   `oprev`, `lnext`, `dnext`, ...) over versioned slotmap keys
//! - The four editing operators: [`splice`](core::quad_edge::QuadEdgeMesh::splice),
//!   [`connect`](core::quad_edge::QuadEdgeMesh::connect),
//!   [`swap`](core::quad_edge::QuadEdgeMesh::swap) and
//!   [`delete`](core::quad_edge::QuadEdgeMesh::delete)
//! - Tolerance-aware predicates: [`on_edge`](core::quad_edge::QuadEdgeMesh::on_edge),
//!   [`right_of`](core::quad_edge::QuadEdgeMesh::right_of) and
//!   [`sign`](geometry::predicates::sign)
//! - A read-only ring validator producing structured reports, with an
//!   optional strict mode that runs it after every edit
//! - Copy-able data attached to directed edges (see
//!   [`DataType`](core::traits::DataType) for constraints)
//! - Serialization of configuration and geometry types with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! Build two triangles sharing a diagonal, then flip the diagonal:
//!
//! ```rust
//! use quadedge::prelude::*;
//!
//! let order = WindingOrder::counter_clockwise();
//! let [a0, b0, c0, d0] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].map(Point::new);
//!
//! let mut mesh: QuadEdgeMesh = QuadEdgeMesh::new();
//! let ab = mesh.make_edge_with_end_points(a0, b0);
//! let bc = mesh.make_edge_with_end_points(b0, c0);
//! mesh.splice(ab.sym(), bc);
//! let ca = mesh.connect(bc, ab, order).unwrap();
//!
//! let cd = mesh.make_edge_with_end_points(c0, d0);
//! mesh.splice(cd, bc.sym());
//! let da = mesh.connect(cd, ab, order).unwrap();
//! assert_eq!(mesh.dest(da), Some(a0));
//! assert!(mesh.is_valid(order).is_ok());
//!
//! // The diagonal C-A becomes D-B.
//! mesh.swap(ca);
//! assert_eq!(mesh.org(ca), Some(d0));
//! assert_eq!(mesh.dest(ca), Some(b0));
//! assert!(mesh.is_valid(order).is_ok());
//! ```
//!
//! # Ownership and references
//!
//! The mesh owns every edge. Callers hold [`EdgeRef`](core::quad_edge::EdgeRef)
//! handles, plain `Copy` values naming a quad-edge slot and a rotation.
//! Deleting an edge invalidates its handles; the arena's versioned keys make
//! such stale handles detectable, and the editing operators treat them as
//! absent rather than panicking.
//!
//! # Logging
//!
//! The crate logs through [`tracing`](https://docs.rs/tracing): splices at
//! `trace`, connect/swap/delete at `debug`, and edge-resolution fallbacks
//! and strict-mode violations at `warn`. It never installs a subscriber.
//!
//! # References
//!
//! - L. Guibas and J. Stolfi, "Primitives for the manipulation of general
//!   subdivisions and the computation of Voronoi diagrams",
//!   *ACM Transactions on Graphics* 4(2), 1985.

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// The `core` module contains the quad-edge arena and everything that edits or
/// inspects it.
///
/// It includes the [`QuadEdgeMesh`](quad_edge::QuadEdgeMesh) arena, the
/// editing operators, the mesh predicates and the ring validator.
pub mod core {
    /// Collection aliases used by the arena and its ring walkers
    pub mod collections;
    pub mod config;
    pub mod operations;
    pub mod predicates;
    pub mod quad_edge;
    pub mod validation;
    /// Traits for data attached to mesh edges.
    pub mod traits {
        pub mod data_type;
        pub use data_type::*;
    }
    // Re-export the `core` modules.
    pub use config::*;
    pub use operations::*;
    pub use quad_edge::*;
    pub use traits::*;
    pub use validation::*;
    // Note: collections module not re-exported here to avoid namespace pollution
}

/// Geometric primitives the mesh core consumes: points, segments, the sign
/// function, winding orders and bounding boxes.
pub mod geometry {
    pub mod point;
    pub mod predicates;
    pub mod segment;
    /// Bounding-box aggregation over point sequences
    pub mod util;
    pub mod winding;
    pub use point::*;
    pub use predicates::*;
    pub use segment::*;
    pub use util::*;
    pub use winding::*;
}

/// A prelude module that re-exports commonly used types and functions.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    // Re-export from core
    pub use crate::core::{
        config::*, operations::*, quad_edge::*, traits::data_type::*, validation::*,
    };

    // Re-export collection types
    pub use crate::core::collections::{FastHashSet, SmallBuffer, fast_hash_set_with_capacity};

    // Re-export from geometry
    pub use crate::geometry::{point::*, predicates::*, segment::*, util::*, winding::*};
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}
