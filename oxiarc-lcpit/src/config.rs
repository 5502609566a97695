//! Match finder configuration.

use crate::matches::Match;
use crate::packed::LCP_MAX;
use oxiarc_core::error::{OxiArcError, Result};

/// Shortest match the tree records by default.
pub const MIN_MATCH_SIZE: usize = 1;

/// Largest supported window (dictionary + block).
///
/// Bounded by the 32-bit signed indices of the default suffix sorter.
pub const MAX_WINDOW_SIZE: usize = i32::MAX as usize;

/// Output stride presets, trading parse quality for memory and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchEffort {
    /// 16 candidates per position.
    Low,
    /// 32 candidates per position.
    #[default]
    Medium,
    /// 64 candidates per position.
    High,
}

impl MatchEffort {
    /// Number of match slots reserved per position.
    pub fn matches_per_index(self) -> usize {
        match self {
            Self::Low => 16,
            Self::Medium => 32,
            Self::High => 64,
        }
    }
}

/// Sizing and filtering parameters of a [`MatchFinder`](crate::MatchFinder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchFinderConfig {
    /// Largest number of bytes compressed per block.
    pub block_size: usize,
    /// Largest window (dictionary + block) per block.
    pub max_window_size: usize,
    /// Match slots per position in the output arrays.
    pub matches_per_index: usize,
    /// Largest offset reported.
    pub max_offset: usize,
    /// Shortest common prefix the tree records.
    pub min_match: usize,
}

impl MatchFinderConfig {
    /// Configuration with [`MatchEffort::Medium`], offsets limited only by the
    /// window, and [`MIN_MATCH_SIZE`].
    pub fn new(block_size: usize, max_window_size: usize) -> Self {
        Self {
            block_size,
            max_window_size,
            matches_per_index: MatchEffort::default().matches_per_index(),
            max_offset: max_window_size,
            min_match: MIN_MATCH_SIZE,
        }
    }

    /// Use the stride of an effort preset.
    pub fn with_effort(mut self, effort: MatchEffort) -> Self {
        self.matches_per_index = effort.matches_per_index();
        self
    }

    /// Set an explicit stride.
    pub fn with_matches_per_index(mut self, matches_per_index: usize) -> Self {
        self.matches_per_index = matches_per_index;
        self
    }

    /// Limit reported offsets.
    pub fn with_max_offset(mut self, max_offset: usize) -> Self {
        self.max_offset = max_offset;
        self
    }

    /// Set the shortest recorded match.
    pub fn with_min_match(mut self, min_match: usize) -> Self {
        self.min_match = min_match;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(OxiArcError::invalid_config("block size must be non-zero"));
        }
        if self.max_window_size == 0 {
            return Err(OxiArcError::invalid_config(
                "maximum window size must be non-zero",
            ));
        }
        if self.block_size > self.max_window_size {
            return Err(OxiArcError::invalid_config(format!(
                "block size {} exceeds maximum window size {}",
                self.block_size, self.max_window_size
            )));
        }
        if self.max_window_size > MAX_WINDOW_SIZE {
            return Err(OxiArcError::invalid_config(format!(
                "maximum window size {} exceeds {MAX_WINDOW_SIZE}",
                self.max_window_size
            )));
        }
        if self.matches_per_index == 0 {
            return Err(OxiArcError::invalid_config(
                "matches per index must be non-zero",
            ));
        }
        if self.max_offset == 0 {
            return Err(OxiArcError::invalid_config("maximum offset must be non-zero"));
        }
        if !(1..=LCP_MAX).contains(&self.min_match) {
            return Err(OxiArcError::invalid_config(format!(
                "minimum match {} outside 1..={LCP_MAX}",
                self.min_match
            )));
        }
        Ok(())
    }

    /// Number of match slots in the per-block output arrays.
    pub fn match_slots(&self) -> usize {
        self.block_size.saturating_mul(self.matches_per_index)
    }

    /// Approximate number of bytes a match finder with this configuration
    /// reserves (tree, links, outputs and the default sorter).
    pub fn footprint_bytes(&self) -> usize {
        let tree = self.max_window_size.saturating_mul(2 * size_of::<u64>());
        let sorter = self.max_window_size.saturating_mul(size_of::<i32>());
        let outputs = self
            .match_slots()
            .saturating_mul(size_of::<Match>())
            .saturating_add(self.block_size);
        tree.saturating_add(sorter).saturating_add(outputs)
    }
}
