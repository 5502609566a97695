//! Packed 64-bit node references.
//!
//! Every slot of the interval tree (and every per-position link) is a single
//! `u64` laid out as:
//!
//! ```text
//!  63  62            48 47                                 0
//! ┌───┬────────────────┬────────────────────────────────────┐
//! │ V │ length  │ tag  │ position or interval id            │
//! └───┴────────────────┴────────────────────────────────────┘
//! ```
//!
//! - `V` is the visited flag. A visited slot holds the last position that
//!   ascended through the interval, and carries no depth.
//! - The depth field is the LCP length shifted left by [`TAG_BITS`], with a
//!   hashed tag in the low bits. Tags split intervals of equal length into
//!   distinct depths; they only affect tie-breaking.
//! - Comparing two unvisited words as integers orders them by depth first.

/// Total number of bits in the depth field (length + tag).
pub const LCP_BITS: u32 = 15;

/// Number of low depth bits holding the disambiguating tag.
pub const TAG_BITS: u32 = 4;

/// Largest match length the tree can represent.
pub const LCP_MAX: usize = (1 << (LCP_BITS - TAG_BITS)) - 1;

/// Largest tagged depth value.
pub const LCP_AND_TAG_MAX: u64 = (1 << LCP_BITS) - 1;

/// Maximum nesting of the interval tree, root included.
///
/// Depths strictly increase along the open-interval stack, so it can never
/// hold more entries than there are distinct tagged depths.
pub const MAX_TREE_DEPTH: usize = 1 << LCP_BITS;

pub(crate) const LCP_SHIFT: u32 = 63 - LCP_BITS;
pub(crate) const LCP_MASK: u64 = LCP_AND_TAG_MAX << LCP_SHIFT;
pub(crate) const POS_MASK: u64 = (1 << LCP_SHIFT) - 1;
pub(crate) const VISITED_FLAG: u64 = 1 << 63;

/// Fibonacci hashing multiplier (2^64 / golden ratio).
const TAG_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// Hash a window position into a [`TAG_BITS`]-wide tag.
#[inline]
pub fn index_tag(pos: usize) -> u64 {
    (pos as u64).wrapping_mul(TAG_MULTIPLIER) >> (64 - TAG_BITS)
}

/// Tagged depth for an LCP of `length` shared by the suffix at `pos` and its
/// lexicographic predecessor.
///
/// Zero lengths stay zero so that they keep meaning "no shared prefix".
#[inline]
pub fn tagged_depth(length: usize, pos: usize) -> u64 {
    if length == 0 {
        0
    } else {
        ((length.min(LCP_MAX) as u64) << TAG_BITS) | index_tag(pos)
    }
}

/// Logical view of a [`NodeRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// A bare position without depth. The all-zero word (the root, or
    /// position 0 before the tree is built) reads as `UnvisitedPosition(0)`.
    UnvisitedPosition(usize),
    /// An interval slot that was last ascended through by this position.
    VisitedPosition(usize),
    /// A link to an interval with a non-zero tagged depth.
    IntervalParent {
        /// Interval id.
        id: usize,
        /// Tagged depth (length and tag).
        depth: u64,
    },
}

/// A packed tree reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeRef(u64);

impl NodeRef {
    /// The root interval (id 0, depth 0).
    pub const ROOT: Self = Self(0);

    /// Wrap a raw slot value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw slot value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack an index with a tagged depth.
    #[inline]
    pub fn packed(index: usize, depth: u64) -> Self {
        debug_assert!((index as u64) <= POS_MASK);
        debug_assert!(depth <= LCP_AND_TAG_MAX);
        Self((index as u64) | (depth << LCP_SHIFT))
    }

    /// Mark an interval as visited by `pos`.
    #[inline]
    pub fn visited(pos: usize) -> Self {
        debug_assert!((pos as u64) <= POS_MASK);
        Self(pos as u64 | VISITED_FLAG)
    }

    /// Position or interval id.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 & POS_MASK) as usize
    }

    /// Tagged depth.
    #[inline]
    pub const fn depth(self) -> u64 {
        (self.0 & LCP_MASK) >> LCP_SHIFT
    }

    /// Match length encoded in the depth, tag stripped.
    #[inline]
    pub const fn length(self) -> usize {
        (self.depth() >> TAG_BITS) as usize
    }

    /// Whether the reference carries a non-zero depth.
    #[inline]
    pub const fn has_depth(self) -> bool {
        self.0 & LCP_MASK != 0
    }

    /// Whether the visited flag is set.
    #[inline]
    pub const fn is_visited(self) -> bool {
        self.0 & VISITED_FLAG != 0
    }

    /// Whether this is the all-zero root reference.
    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }

    /// Decode into a [`RefKind`].
    pub fn kind(self) -> RefKind {
        if self.is_visited() {
            RefKind::VisitedPosition(self.index())
        } else if self.has_depth() {
            RefKind::IntervalParent {
                id: self.index(),
                depth: self.depth(),
            }
        } else {
            RefKind::UnvisitedPosition(self.index())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(LCP_MAX, 2047);
        assert_eq!(LCP_SHIFT, 48);
        assert_eq!(MAX_TREE_DEPTH, 32768);
        assert_eq!(LCP_MASK & POS_MASK, 0);
        assert_eq!(LCP_MASK & VISITED_FLAG, 0);
    }

    #[test]
    fn test_kind() {
        assert_eq!(NodeRef::ROOT.kind(), RefKind::UnvisitedPosition(0));
        assert_eq!(
            NodeRef::from_raw(42).kind(),
            RefKind::UnvisitedPosition(42)
        );
        assert_eq!(NodeRef::visited(7).kind(), RefKind::VisitedPosition(7));
        assert_eq!(NodeRef::visited(0).kind(), RefKind::VisitedPosition(0));

        let depth = tagged_depth(5, 3);
        let r = NodeRef::packed(9, depth);
        assert_eq!(r.kind(), RefKind::IntervalParent { id: 9, depth });
        assert_eq!(r.length(), 5);
    }

    #[test]
    fn test_visited_position_zero_is_not_root() {
        let r = NodeRef::visited(0);
        assert!(!r.is_root());
        assert!(!r.has_depth());
        assert_eq!(r.index(), 0);
    }

    #[test]
    fn test_depth_ordering() {
        let shallow = NodeRef::packed(1000, tagged_depth(3, 1));
        let deep = NodeRef::packed(1, tagged_depth(4, 1));
        assert!(deep > shallow);
        assert!(shallow > NodeRef::ROOT);
    }

    #[test]
    fn test_tagged_depth() {
        assert_eq!(tagged_depth(0, 12345), 0);
        for pos in 0..64 {
            let d = tagged_depth(10, pos);
            assert_eq!(d >> TAG_BITS, 10);
            assert!(d <= LCP_AND_TAG_MAX);
        }
        assert_eq!(tagged_depth(LCP_MAX + 100, 0) >> TAG_BITS, LCP_MAX as u64);
    }

    #[test]
    fn test_index_tag_spreads() {
        let mut seen = [false; 1 << TAG_BITS];
        for pos in 0..256 {
            seen[index_tag(pos) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
