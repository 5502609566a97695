//! Online match enumeration.
//!
//! Positions are advanced strictly in increasing order. Advancing position
//! `pos` links every interval on its ancestor chain to `pos`, so that later
//! positions descending into the same subtree stop their ascent at `pos`.
//! Because only already-advanced positions are ever linked, every match
//! found points backwards.
//!
//! Two link kinds are walked:
//!
//! - the direct chain: ascending from the deepest interval containing `pos`
//!   until an interval already visited by an earlier position is reached;
//! - the indirect chain: from that earlier position, following `pos_data`
//!   links to later positions that superseded it in deeper intervals.
//!
//! Every ancestor interval yields one direct candidate, its most recent
//! visitor. Blocks that form a whole stream also get the visitor each
//! interval had before the walk, and the positions passed on link chains,
//! as long as they lie far from the previous candidate.

use crate::matches::{
    BlockFlags, MAX_MATCH_DEPTH, Match, MatchDepth, MatchesAt, SHORT_OFFSET_LIMIT,
};
use crate::packed::NodeRef;
use crate::tree::IntervalTree;

/// Link-chain candidates closer than this to the previous offset add
/// little for the parser and are skipped.
const MIN_LINK_OFFSET_GAP: usize = 128;

/// Link-chain candidates at least this long are skipped.
const MAX_LINK_LENGTH: usize = 1280;

/// Capacity-bounded writer for one position's candidates.
///
/// A candidate on the same diagonal as the previous one (offset and length
/// both one less) is folded into it by bumping its depth counter.
struct MatchSink<'a> {
    out: &'a mut [Match],
    count: usize,
    pos: usize,
    max_offset: usize,
    prev_offset: usize,
    prev_len: usize,
    run: u16,
}

impl<'a> MatchSink<'a> {
    fn new(out: &'a mut [Match], pos: usize, max_offset: usize) -> Self {
        Self {
            out,
            count: 0,
            pos,
            max_offset,
            prev_offset: 0,
            prev_len: 0,
            run: 0,
        }
    }

    /// Offset of `source` if it is in range and there is room to record it.
    #[inline]
    fn offset_of(&self, source: usize) -> Option<usize> {
        if source >= self.pos || self.count >= self.out.len() {
            return None;
        }
        let offset = self.pos - source;
        (offset <= self.max_offset).then_some(offset)
    }

    #[inline]
    fn far_from_prev(&self, offset: usize) -> bool {
        offset.abs_diff(self.prev_offset) >= MIN_LINK_OFFSET_GAP
    }

    fn emit(&mut self, offset: usize, length: usize, indirect: bool) {
        let diagonal = self.count > 0
            && self.prev_len > 2
            && offset + 1 == self.prev_offset
            && length + 1 == self.prev_len
            && self.run < MAX_MATCH_DEPTH;

        if diagonal {
            self.run += 1;
            self.out[self.count - 1].depth = MatchDepth::coalesced(self.run, indirect);
        } else {
            self.run = 0;
            self.out[self.count] = Match {
                length: length as u16,
                offset: offset as u32,
                depth: if indirect {
                    MatchDepth::INDIRECT
                } else {
                    MatchDepth::DIRECT
                },
            };
            self.count += 1;
        }
        self.prev_offset = offset;
        self.prev_len = length;
    }

    /// The last visitor of the interval where the direct ascent stopped.
    fn visitor(&mut self, source: usize, length: usize) {
        if let Some(offset) = self.offset_of(source) {
            self.emit(offset, length, false);
        }
    }

    /// The first position reached through a `pos_data` link.
    fn first_link(&mut self, source: usize, length: usize) {
        if let Some(offset) = self.offset_of(source) {
            if self.far_from_prev(offset) {
                self.emit(offset, length, true);
            }
        }
    }

    /// A further position along a `pos_data` link chain. Length-2
    /// candidates need a spare slot.
    fn chained_link(&mut self, source: usize, length: usize) {
        if let Some(offset) = self.offset_of(source) {
            let spare = self.count + 1 < self.out.len();
            if (length >= 3 || (length >= 2 && spare))
                && length < MAX_LINK_LENGTH
                && self.far_from_prev(offset)
            {
                self.emit(offset, length, true);
            }
        }
    }

    /// The most recent visitor of an ancestor interval. Dropped when it
    /// repeats the previous offset.
    fn direct(&mut self, source: usize, length: usize) {
        if let Some(offset) = self.offset_of(source) {
            if offset != self.prev_offset {
                self.emit(offset, length, false);
            }
        }
    }

    /// The visitor of the next ancestor, seen before following its links.
    fn parent_visitor(&mut self, source: usize, length: usize) {
        if let Some(offset) = self.offset_of(source) {
            if length >= 2 && self.far_from_prev(offset) {
                self.emit(offset, length, true);
            }
        }
    }
}

impl IntervalTree {
    /// Advance the tree past `pos`, writing its matches to `out`.
    ///
    /// Must be called for every position of the window in increasing order;
    /// the tree mutation is required even when `out` is empty.
    pub(crate) fn advance(
        &mut self,
        pos: usize,
        out: &mut [Match],
        max_offset: usize,
        flags: BlockFlags,
    ) -> MatchesAt {
        debug_assert!(pos < self.len(), "position {pos} outside the tree");

        let intervals = &mut self.intervals;
        let pos_data = &mut self.pos_data;
        let single = flags.is_single_block();
        let mut sink = MatchSink::new(out, pos, max_offset);
        let mut short_offset = 0usize;

        // Deepest interval containing the current suffix.
        let mut node = NodeRef::from_raw(pos_data[pos]);
        pos_data[pos] = NodeRef::ROOT.raw();

        // Ascend through unvisited intervals, linking them to `pos`.
        let mut parent = NodeRef::from_raw(intervals[node.index()]);
        while parent.has_depth() {
            intervals[node.index()] = NodeRef::visited(pos).raw();
            node = parent;
            parent = NodeRef::from_raw(intervals[node.index()]);
        }

        if parent.is_root() {
            // Either the root itself or an unvisited child of the root:
            // nothing earlier shares a prefix with `pos`.
            if !node.is_root() {
                intervals[node.index()] = NodeRef::visited(pos).raw();
            }
            return MatchesAt::default();
        }

        let mut match_pos = parent.index();
        if single {
            sink.visitor(match_pos, node.length());
        }

        loop {
            // Follow supersession links to the most recent visitor of
            // `node`; every position passed on the way shares its prefix.
            let mut super_ref = NodeRef::from_raw(pos_data[match_pos]);
            if super_ref > node {
                match_pos = NodeRef::from_raw(intervals[super_ref.index()]).index();
                if single {
                    sink.first_link(match_pos, node.length());
                }
                super_ref = NodeRef::from_raw(pos_data[match_pos]);
                while super_ref > node {
                    match_pos = NodeRef::from_raw(intervals[super_ref.index()]).index();
                    if single {
                        sink.chained_link(match_pos, node.length());
                    }
                    super_ref = NodeRef::from_raw(pos_data[match_pos]);
                }
            }

            intervals[node.index()] = NodeRef::visited(pos).raw();
            pos_data[match_pos] = node.raw();

            sink.direct(match_pos, node.length());
            let offset = pos.saturating_sub(match_pos);
            if offset != 0 && offset < SHORT_OFFSET_LIMIT && node.length() != 0 {
                short_offset = offset;
            }

            if super_ref.is_root() {
                break;
            }
            node = super_ref;
            match_pos = NodeRef::from_raw(intervals[node.index()]).index();
            if single {
                sink.parent_visitor(match_pos, node.length());
            }
        }

        MatchesAt {
            count: sink.count,
            short_offset: short_offset as u8,
        }
    }
}
