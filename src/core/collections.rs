//! Collection aliases used by the quad-edge arena and its ring walkers.
//!
//! Traversal code tracks visited edges in hash sets and gathers ring members
//! into small inline buffers. Both are aliased here so the concrete choices
//! (`rustc_hash` hashing, `smallvec` inline storage, the slotmap flavor) stay
//! in one place.

use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smallvec::SmallVec;

#[cfg(not(feature = "dense-slotmap"))]
use slotmap::SlotMap;

#[cfg(feature = "dense-slotmap")]
use slotmap::DenseSlotMap;

// =============================================================================
// STORAGE BACKEND
// =============================================================================

/// Arena backend for quad-edge records.
///
/// `DenseSlotMap` by default; `SlotMap` when built with
/// `--no-default-features`. Both hand out versioned keys, so a key to a
/// removed quad-edge is rejected instead of silently aliasing a new one.
#[cfg(not(feature = "dense-slotmap"))]
pub type StorageMap<K, V> = SlotMap<K, V>;

/// Arena backend for quad-edge records.
///
/// `DenseSlotMap` by default; `SlotMap` when built with
/// `--no-default-features`. Both hand out versioned keys, so a key to a
/// removed quad-edge is rejected instead of silently aliasing a new one.
#[cfg(feature = "dense-slotmap")]
pub type StorageMap<K, V> = DenseSlotMap<K, V>;

// =============================================================================
// HASHED AND INLINE COLLECTIONS
// =============================================================================

/// `HashSet` with the fast non-cryptographic `FxHasher`.
///
/// ⚠️ Not DoS-resistant; only use with internal keys.
///
/// # Examples
///
/// ```rust
/// use quadedge::core::collections::FastHashSet;
///
/// let mut set: FastHashSet<u64> = FastHashSet::default();
/// set.insert(7);
/// assert!(set.contains(&7));
/// ```
pub type FastHashSet<T> = FxHashSet<T>;

/// `HashMap` with the fast non-cryptographic `FxHasher`.
///
/// ⚠️ Not DoS-resistant; only use with internal keys.
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Stack-allocated buffer that spills to the heap past `N` elements.
///
/// Origin rings in triangulations rarely exceed a handful of edges, so ring
/// walkers collect into `SmallBuffer<EdgeRef, RING_BUFFER_SIZE>`.
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Inline capacity for ring buffers; a vertex of a planar triangulation has
/// six neighbors on average.
pub const RING_BUFFER_SIZE: usize = 8;

/// Creates a [`FastHashSet`] with pre-allocated capacity.
///
/// # Examples
///
/// ```rust
/// use quadedge::core::collections::fast_hash_set_with_capacity;
///
/// let set = fast_hash_set_with_capacity::<u32>(64);
/// assert!(set.capacity() >= 64);
/// ```
#[inline]
#[must_use]
pub fn fast_hash_set_with_capacity<T>(capacity: usize) -> FastHashSet<T> {
    FastHashSet::with_capacity_and_hasher(capacity, FxBuildHasher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_buffer_spills_past_inline_capacity() {
        let mut buffer: SmallBuffer<usize, RING_BUFFER_SIZE> = SmallBuffer::new();
        buffer.extend(0..RING_BUFFER_SIZE);
        assert!(!buffer.spilled());
        buffer.push(RING_BUFFER_SIZE);
        assert!(buffer.spilled());
        assert_eq!(buffer.len(), RING_BUFFER_SIZE + 1);
    }

    #[test]
    fn fast_hash_set_deduplicates() {
        let mut set = fast_hash_set_with_capacity::<u32>(4);
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
    }
}
