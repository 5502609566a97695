//! Match candidates handed to the optimal parser.

use crate::packed::LCP_MAX;
use std::ops::BitOr;

/// Largest value of the coalescing counter in [`MatchDepth`].
pub const MAX_MATCH_DEPTH: u16 = LCP_MAX as u16;

/// Offsets below this value are reported through the short-match channel.
pub const SHORT_OFFSET_LIMIT: usize = 16;

/// Coalescing counter of a match, plus how it was found.
///
/// The low 15 bits count how many further candidates were folded into this
/// entry. A candidate folds into the previous one when it sits on the same
/// diagonal: offset one less and length one less. The top bit is set when
/// the last candidate recorded here came from a link chain or from an
/// ancestor's earlier visitor rather than the direct ancestor chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchDepth(u16);

impl MatchDepth {
    /// Flag marking an indirect-ascent candidate.
    pub const INDIRECT_FLAG: u16 = 0x8000;

    /// A fresh candidate from the direct ancestor chain.
    pub const DIRECT: Self = Self(0);

    /// A fresh candidate from the indirect ascent.
    pub const INDIRECT: Self = Self(Self::INDIRECT_FLAG);

    /// Wrap a raw value as stored in match arrays.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw value (counter with the flag in the top bit).
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Number of candidates coalesced into this entry.
    pub const fn count(self) -> u16 {
        self.0 & !Self::INDIRECT_FLAG
    }

    /// Whether the entry came from the indirect ascent.
    pub const fn is_indirect(self) -> bool {
        self.0 & Self::INDIRECT_FLAG != 0
    }

    /// An entry standing for `count` further candidates folded into it,
    /// flagged after the kind of the last one folded.
    pub(crate) fn coalesced(count: u16, indirect: bool) -> Self {
        debug_assert!(count <= MAX_MATCH_DEPTH);
        if indirect {
            Self(count | Self::INDIRECT_FLAG)
        } else {
            Self(count)
        }
    }
}

/// A backward-copy candidate.
///
/// `Match::default()` (all zero) marks an unused slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Match {
    /// Guaranteed common prefix length (may understate the real match).
    pub length: u16,
    /// Distance back from the current position.
    pub offset: u32,
    /// Coalescing counter and direct/indirect flag.
    pub depth: MatchDepth,
}

impl Match {
    /// Whether this is an unused slot.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Result of enumerating one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchesAt {
    /// Number of candidates written to the output slice.
    pub count: usize,
    /// Shallowest direct-chain offset below [`SHORT_OFFSET_LIMIT`], or 0.
    pub short_offset: u8,
}

/// Block boundary flags passed through to enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockFlags(u8);

impl BlockFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// The block is the first of its stream.
    pub const FIRST: Self = Self(1);
    /// The block is the last of its stream.
    pub const LAST: Self = Self(2);
    /// A stream made of exactly one block.
    pub const SINGLE: Self = Self(3);

    /// Whether all flags in `other` are set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the block is a whole stream (both FIRST and LAST set).
    ///
    /// Only such blocks report the extra candidates found at interval
    /// visitors and along `pos_data` links; other blocks get one candidate
    /// per ancestor interval.
    pub const fn is_single_block(self) -> bool {
        self.contains(Self::SINGLE)
    }

    /// Flags for block `index` of a stream of `count` blocks.
    pub fn for_block(index: usize, count: usize) -> Self {
        let mut flags = Self::NONE;
        if index == 0 {
            flags = flags | Self::FIRST;
        }
        if index + 1 == count {
            flags = flags | Self::LAST;
        }
        flags
    }
}

impl BitOr for BlockFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
