//! Bound for opaque data attached to directed edges.
//!
//! The quad-edge core never inspects edge data. Triangulation drivers use it
//! to tag edges (constraint flags, face identifiers, marks for flip queues).

use std::{fmt::Debug, hash::Hash};

/// Trait alias for data types that can be attached to directed edges.
///
/// Data types must implement `Copy`, which keeps edge records plain values
/// and lets accessors return data by value.
///
/// # Required Traits
///
/// - `Copy`: For efficient copying by value (includes `Clone`)
/// - `Eq`: For equality comparison
/// - `Hash`: For use in hash-based collections
/// - `Debug`: For debug formatting
///
/// # Usage
///
/// ```rust
/// use quadedge::core::DataType;
///
/// fn tag<T: DataType>(data: T) -> Option<T> {
///     Some(data)
/// }
///
/// // Types that implement DataType:
/// // - (), the default: no data
/// // - i32, u32, bool, char (primitive Copy types)
/// // - Option<T> where T: DataType
/// // - Custom Copy enums and ids
/// assert_eq!(tag(7_u32), Some(7));
/// ```
pub trait DataType: Copy + Eq + Hash + Debug {}

// Blanket implementation for all types that satisfy the bounds
impl<T> DataType for T where T: Copy + Eq + Hash + Debug {}
