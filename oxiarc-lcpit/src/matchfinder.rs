//! Match finder context.
//!
//! A [`MatchFinder`] owns every buffer needed to find matches for one
//! compression session: the suffix sorter's working memory, the interval
//! tree, and the per-block match output. All of it is reserved once, sized
//! for the largest block and window, and reused for every block.
//!
//! # Example
//!
//! ```rust
//! use oxiarc_lcpit::{BlockFlags, MatchFinder, MatchFinderConfig};
//!
//! let config = MatchFinderConfig::new(64, 64).with_matches_per_index(4);
//! let mut finder = MatchFinder::new(config).unwrap();
//!
//! finder
//!     .find_all_block_matches(b"abcabcabcX", 0, BlockFlags::SINGLE)
//!     .unwrap();
//!
//! let at_three = finder.matches_at(3);
//! assert_eq!(at_three[0].offset, 3);
//! assert!(at_three[0].length >= 3);
//! ```

use crate::config::MatchFinderConfig;
use crate::matches::{BlockFlags, Match, MatchesAt};
use crate::sorter::DivSufSorter;
use crate::tree::IntervalTree;
use oxiarc_core::error::{OxiArcError, Result, try_alloc};
use oxiarc_core::traits::SuffixSorter;
use tracing::{debug, warn};

/// LCP-interval tree match finder.
#[derive(Debug)]
pub struct MatchFinder<S: SuffixSorter = DivSufSorter> {
    config: MatchFinderConfig,
    sorter: Option<S>,
    tree: IntervalTree,
    matches: Vec<Match>,
    short_offsets: Vec<u8>,
    block_len: usize,
}

impl MatchFinder<DivSufSorter> {
    /// Create a match finder using the built-in suffix sorter.
    pub fn new(config: MatchFinderConfig) -> Result<Self> {
        config.validate()?;
        let sorter = DivSufSorter::with_capacity(config.max_window_size)?;
        Self::with_sorter(config, sorter)
    }
}

impl<S: SuffixSorter> MatchFinder<S> {
    /// Create a match finder around an existing sorter.
    ///
    /// The sorter must accept windows of `config.max_window_size` bytes.
    /// Every other buffer is reserved here; if a reservation fails, the
    /// buffers already reserved are dropped before the error is returned.
    pub fn with_sorter(config: MatchFinderConfig, sorter: S) -> Result<Self> {
        config.validate()?;

        let tree = IntervalTree::with_capacity(config.max_window_size)?;
        let matches = try_alloc(config.match_slots(), Match::default())?;
        let short_offsets = try_alloc(config.block_size, 0u8)?;

        debug!(
            block_size = config.block_size,
            max_window_size = config.max_window_size,
            matches_per_index = config.matches_per_index,
            footprint = config.footprint_bytes(),
            "allocated match finder"
        );

        Ok(Self {
            config,
            sorter: Some(sorter),
            tree,
            matches,
            short_offsets,
            block_len: 0,
        })
    }

    /// The configuration this finder was created with.
    pub fn config(&self) -> &MatchFinderConfig {
        &self.config
    }

    /// Largest window that can currently be processed (0 after
    /// [`release`](Self::release)).
    pub fn capacity(&self) -> usize {
        if self.sorter.is_some() {
            self.tree.capacity()
        } else {
            0
        }
    }

    /// Whether buffers are still held.
    pub fn is_allocated(&self) -> bool {
        self.sorter.is_some()
    }

    /// Build the suffix array and interval tree over `window`.
    ///
    /// After a successful build, positions `0..window.len()` must each be
    /// advanced exactly once, in increasing order, through
    /// [`find_matches_at`](Self::find_matches_at),
    /// [`skip_matches`](Self::skip_matches) or
    /// [`find_all_matches`](Self::find_all_matches).
    pub fn build(&mut self, window: &[u8]) -> Result<()> {
        self.block_len = 0;
        let capacity = self.capacity();
        let Some(sorter) = self.sorter.as_mut() else {
            return Err(OxiArcError::window_too_large(window.len(), capacity));
        };

        match self.tree.build(sorter, window, self.config.min_match) {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!(window = window.len(), error = %err, "suffix array construction failed");
                Err(err)
            }
        }
    }

    /// Enumerate the matches at `pos`, writing at most `out.len()` of them.
    ///
    /// This also links the tree to `pos` so that later positions can find
    /// it, and must therefore be called even when no output is wanted.
    pub fn find_matches_at(&mut self, pos: usize, out: &mut [Match], flags: BlockFlags) -> MatchesAt {
        self.tree.advance(pos, out, self.config.max_offset, flags)
    }

    /// Advance the tree over `start..end`, discarding every match.
    ///
    /// Used to warm the tree up over a dictionary prefix.
    pub fn skip_matches(&mut self, start: usize, end: usize) {
        for pos in start..end {
            self.tree
                .advance(pos, &mut [], self.config.max_offset, BlockFlags::NONE);
        }
    }

    /// Enumerate `start..end` into fixed-stride output arrays.
    ///
    /// `matches` receives `matches_per_index` slots per position, with
    /// unused slots zeroed; `short_offsets` receives one entry per position.
    pub fn find_all_matches(
        &mut self,
        start: usize,
        end: usize,
        matches: &mut [Match],
        short_offsets: &mut [u8],
        flags: BlockFlags,
    ) -> Result<()> {
        find_range(
            &mut self.tree,
            &self.config,
            start..end,
            matches,
            short_offsets,
            flags,
        )
    }

    /// Find matches for one block.
    ///
    /// `window` is the dictionary (its first `dict_size` bytes) followed by
    /// the bytes to compress. The tree is built over the whole window, the
    /// dictionary is skipped, and the block positions are enumerated into
    /// the finder's own output buffers.
    ///
    /// On failure no block output is exposed: [`block_len`](Self::block_len)
    /// stays 0 until the next successful call.
    pub fn find_all_block_matches(
        &mut self,
        window: &[u8],
        dict_size: usize,
        flags: BlockFlags,
    ) -> Result<()> {
        self.block_len = 0;
        if dict_size > window.len() {
            return Err(OxiArcError::invalid_config(format!(
                "dictionary of {dict_size} bytes is larger than the {} byte window",
                window.len()
            )));
        }
        if window.len() > self.capacity() {
            return Err(OxiArcError::window_too_large(window.len(), self.capacity()));
        }
        let block_len = window.len() - dict_size;
        if block_len > self.config.block_size {
            return Err(OxiArcError::window_too_large(
                block_len,
                self.config.block_size,
            ));
        }

        self.build(window)?;
        self.skip_matches(0, dict_size);

        let stride = self.config.matches_per_index;
        find_range(
            &mut self.tree,
            &self.config,
            dict_size..window.len(),
            &mut self.matches[..block_len * stride],
            &mut self.short_offsets[..block_len],
            flags,
        )?;
        self.block_len = block_len;

        debug!(
            window = window.len(),
            dict_size,
            block_len,
            "found block matches"
        );
        Ok(())
    }

    /// Number of positions in the last successfully processed block.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// All match slots of the last block, `matches_per_index` per position.
    pub fn matches(&self) -> &[Match] {
        &self.matches[..self.block_len * self.config.matches_per_index]
    }

    /// Match slots of block position `index` (relative to the block start).
    pub fn matches_at(&self, index: usize) -> &[Match] {
        let stride = self.config.matches_per_index;
        &self.matches()[index * stride..(index + 1) * stride]
    }

    /// Short-match offsets of the last block, one per position (0 = none).
    pub fn short_offsets(&self) -> &[u8] {
        &self.short_offsets[..self.block_len]
    }

    /// Free every buffer.
    ///
    /// Safe to call any number of times. Afterwards only empty windows are
    /// accepted.
    pub fn release(&mut self) {
        if self.sorter.take().is_some() {
            debug!("released match finder");
        }
        self.tree.release();
        self.matches = Vec::new();
        self.short_offsets = Vec::new();
        self.block_len = 0;
    }
}

impl<S: SuffixSorter> Drop for MatchFinder<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Enumerate a position range into fixed-stride slices.
fn find_range(
    tree: &mut IntervalTree,
    config: &MatchFinderConfig,
    range: std::ops::Range<usize>,
    matches: &mut [Match],
    short_offsets: &mut [u8],
    flags: BlockFlags,
) -> Result<()> {
    let stride = config.matches_per_index;
    let positions = range.len();
    let needed = positions * stride;
    if matches.len() < needed {
        return Err(OxiArcError::buffer_too_small(needed, matches.len()));
    }
    if short_offsets.len() < positions {
        return Err(OxiArcError::buffer_too_small(positions, short_offsets.len()));
    }

    let slots = matches[..needed].chunks_exact_mut(stride);
    for ((pos, slot), short) in range.zip(slots).zip(short_offsets.iter_mut()) {
        let found = tree.advance(pos, slot, config.max_offset, flags);
        slot[found.count..].fill(Match::default());
        *short = found.short_offset;
    }
    Ok(())
}
