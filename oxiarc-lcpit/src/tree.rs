//! Implicit LCP-interval tree.
//!
//! The tree is built by a single sweep over the rank-ordered
//! `(position, tagged LCP)` entries, keeping the currently open intervals on
//! a stack ordered by increasing depth. The sweep produces two arrays:
//!
//! - `intervals[id]`: the parent reference of each interval (the root, id 0,
//!   is its own parent and stores `0`).
//! - `pos_data[pos]`: the deepest interval containing each position.
//!
//! Intervals have no child lists. Match enumeration discovers membership by
//! ascending from a position's leaf, and rewrites `intervals` as it goes.
//!
//! The construction scheme follows the lcp-interval matchfinder of wimlib.

use crate::lcp::build_suffix_array;
use crate::packed::{MAX_TREE_DEPTH, NodeRef};
use oxiarc_core::error::{OxiArcError, Result, try_alloc};
use oxiarc_core::traits::SuffixSorter;
use tracing::trace;

/// Fixed-capacity stack of open intervals.
#[derive(Debug)]
pub(crate) struct IntervalStack {
    entries: Vec<u64>,
    len: usize,
}

impl IntervalStack {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            entries: try_alloc(capacity, 0)?,
            len: 0,
        })
    }

    /// Reset to a stack holding only the root.
    fn reset(&mut self) {
        self.entries[0] = NodeRef::ROOT.raw();
        self.len = 1;
    }

    #[inline]
    fn top(&self) -> NodeRef {
        NodeRef::from_raw(self.entries[self.len - 1])
    }

    #[inline]
    fn push(&mut self, node: NodeRef) {
        debug_assert!(self.len < self.entries.len(), "interval stack overflow");
        self.entries[self.len] = node.raw();
        self.len += 1;
    }

    #[inline]
    fn pop(&mut self) -> NodeRef {
        debug_assert!(self.len > 1, "popped the root interval");
        self.len -= 1;
        NodeRef::from_raw(self.entries[self.len])
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.entries.len()
    }
}

/// Storage for the suffix array, the interval tree and per-position links.
#[derive(Debug)]
pub struct IntervalTree {
    pub(crate) intervals: Vec<u64>,
    pub(crate) pos_data: Vec<u64>,
    stack: IntervalStack,
    len: usize,
}

impl IntervalTree {
    /// Reserve storage for windows of up to `max_window_size` bytes.
    pub fn with_capacity(max_window_size: usize) -> Result<Self> {
        Ok(Self {
            intervals: try_alloc(max_window_size, 0)?,
            pos_data: try_alloc(max_window_size, 0)?,
            // One push per rank at most, so small windows need less.
            stack: IntervalStack::with_capacity(MAX_TREE_DEPTH.min(max_window_size + 1))?,
            len: 0,
        })
    }

    /// Largest window the tree can be built over.
    pub fn capacity(&self) -> usize {
        self.intervals.len()
    }

    /// Number of positions in the current tree (0 when none is built).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no tree is currently built.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Build the tree over `window`, returning the number of intervals
    /// created (root included).
    ///
    /// The previous tree is invalidated before anything else happens, so a
    /// sorter failure leaves the tree empty rather than half-built.
    pub fn build<S: SuffixSorter>(
        &mut self,
        sorter: &mut S,
        window: &[u8],
        min_match: usize,
    ) -> Result<usize> {
        self.len = 0;
        if window.len() > self.capacity() {
            return Err(OxiArcError::window_too_large(window.len(), self.capacity()));
        }
        if window.is_empty() {
            return Ok(0);
        }

        build_suffix_array(
            sorter,
            window,
            &mut self.intervals,
            &mut self.pos_data,
            min_match,
        )?;
        let count = build_intervals(
            &mut self.intervals[..window.len()],
            &mut self.pos_data[..window.len()],
            &mut self.stack,
        );
        self.len = window.len();

        trace!(
            positions = window.len(),
            intervals = count,
            "built lcp-interval tree"
        );
        Ok(count)
    }

    /// Parent reference stored for interval `id` (or the visitor, once the
    /// interval has been ascended through).
    pub fn parent(&self, id: usize) -> NodeRef {
        NodeRef::from_raw(self.intervals[id])
    }

    /// Link stored for position `pos`.
    pub fn link(&self, pos: usize) -> NodeRef {
        NodeRef::from_raw(self.pos_data[pos])
    }

    /// Free all storage. The tree has zero capacity afterwards.
    pub fn release(&mut self) {
        self.intervals = Vec::new();
        self.pos_data = Vec::new();
        self.stack = IntervalStack {
            entries: Vec::new(),
            len: 0,
        };
        self.len = 0;
    }
}

/// Fold rank-ordered `(position, depth)` entries into the interval tree.
///
/// Runs in place: interval ids never exceed the rank being read, so every
/// write to `intervals` lands on an entry that has already been consumed.
fn build_intervals(intervals: &mut [u64], pos_data: &mut [u64], stack: &mut IntervalStack) -> usize {
    let n = intervals.len();
    debug_assert!(stack.capacity() >= 1);

    stack.reset();
    let mut prev_pos = NodeRef::from_raw(intervals[0]).index();
    intervals[0] = NodeRef::ROOT.raw();
    let mut next_id = 1usize;

    for r in 1..n {
        let entry = NodeRef::from_raw(intervals[r]);
        let next_pos = entry.index();
        let next_depth = entry.depth();
        let top = stack.top();

        if next_depth == top.depth() {
            // Still inside the deepest open interval.
            pos_data[prev_pos] = top.raw();
        } else if next_depth > top.depth() {
            let opened = NodeRef::packed(next_id, next_depth);
            next_id += 1;
            stack.push(opened);
            pos_data[prev_pos] = opened.raw();
        } else {
            pos_data[prev_pos] = top.raw();
            loop {
                let closed = stack.pop();
                let super_interval = stack.top();

                if next_depth == super_interval.depth() {
                    intervals[closed.index()] = super_interval.raw();
                    break;
                } else if next_depth > super_interval.depth() {
                    // The incoming depth lies strictly between the closed
                    // interval and its enclosing one.
                    let opened = NodeRef::packed(next_id, next_depth);
                    next_id += 1;
                    stack.push(opened);
                    intervals[closed.index()] = opened.raw();
                    break;
                } else {
                    intervals[closed.index()] = super_interval.raw();
                }
            }
        }
        prev_pos = next_pos;
    }

    pos_data[prev_pos] = stack.top().raw();
    while stack.len() > 1 {
        let closed = stack.pop();
        intervals[closed.index()] = stack.top().raw();
    }

    next_id
}
