//! Multi-block drivers.
//!
//! Blocks are independent: each carries its own window (dictionary prefix
//! plus block bytes), so they can be processed by one reused context in
//! order, or by one context per worker thread with the `parallel` feature.

use crate::config::MatchFinderConfig;
use crate::matches::{BlockFlags, Match};
use crate::matchfinder::MatchFinder;
use oxiarc_core::error::Result;
use oxiarc_core::traits::SuffixSorter;

#[cfg(feature = "parallel")]
use oxiarc_core::error::OxiArcError;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One block to search.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    /// Dictionary bytes followed by the bytes to compress.
    pub window: &'a [u8],
    /// Length of the dictionary prefix of `window`.
    pub dict_size: usize,
    /// Boundary flags of the block.
    pub flags: BlockFlags,
}

impl<'a> Block<'a> {
    /// A block without dictionary.
    pub fn new(window: &'a [u8], flags: BlockFlags) -> Self {
        Self {
            window,
            dict_size: 0,
            flags,
        }
    }

    /// A block whose window starts with `dict_size` dictionary bytes.
    pub fn with_dictionary(window: &'a [u8], dict_size: usize, flags: BlockFlags) -> Self {
        Self {
            window,
            dict_size,
            flags,
        }
    }

    /// Split `data` into consecutive blocks of at most `block_size` bytes,
    /// each using up to `dict_size` preceding bytes as its dictionary.
    pub fn split(data: &'a [u8], block_size: usize, dict_size: usize) -> Vec<Self> {
        if data.is_empty() || block_size == 0 {
            return Vec::new();
        }
        let count = data.len().div_ceil(block_size);
        (0..count)
            .map(|index| {
                let start = index * block_size;
                let end = (start + block_size).min(data.len());
                let dict_start = start.saturating_sub(dict_size);
                Self {
                    window: &data[dict_start..end],
                    dict_size: start - dict_start,
                    flags: BlockFlags::for_block(index, count),
                }
            })
            .collect()
    }
}

/// Owned match output of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatches {
    /// Match slots, `matches_per_index` per block position.
    pub matches: Vec<Match>,
    /// Short-match offset per block position (0 = none).
    pub short_offsets: Vec<u8>,
}

/// Search one block with `finder` and copy its output out.
fn search_block<S: SuffixSorter>(finder: &mut MatchFinder<S>, block: &Block<'_>) -> Result<BlockMatches> {
    finder.find_all_block_matches(block.window, block.dict_size, block.flags)?;
    Ok(BlockMatches {
        matches: finder.matches().to_vec(),
        short_offsets: finder.short_offsets().to_vec(),
    })
}

/// Search every block in order with a single reused context.
pub fn find_block_matches(blocks: &[Block<'_>], config: MatchFinderConfig) -> Result<Vec<BlockMatches>> {
    let mut finder = MatchFinder::new(config)?;
    blocks
        .iter()
        .map(|block| search_block(&mut finder, block))
        .collect()
}

/// Search blocks in parallel (requires `parallel` feature).
///
/// Each rayon worker allocates its own context on first use and reuses it
/// for every block it picks up. The output is identical to
/// [`find_block_matches`].
#[cfg(feature = "parallel")]
pub fn find_block_matches_parallel(
    blocks: &[Block<'_>],
    config: MatchFinderConfig,
) -> Result<Vec<BlockMatches>> {
    config.validate()?;

    blocks
        .par_iter()
        .map_init(
            || MatchFinder::new(config),
            |finder, block| match finder {
                Ok(finder) => search_block(finder, block),
                Err(_) => Err(OxiArcError::allocation(config.footprint_bytes())),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_blocks() {
        let data = b"0123456789";
        let blocks = Block::split(data, 4, 2);
        assert_eq!(blocks.len(), 3);

        assert_eq!(blocks[0].window, b"0123");
        assert_eq!(blocks[0].dict_size, 0);
        assert_eq!(blocks[0].flags, BlockFlags::FIRST);

        assert_eq!(blocks[1].window, b"234567");
        assert_eq!(blocks[1].dict_size, 2);
        assert_eq!(blocks[1].flags, BlockFlags::NONE);

        assert_eq!(blocks[2].window, b"6789");
        assert_eq!(blocks[2].dict_size, 2);
        assert_eq!(blocks[2].flags, BlockFlags::LAST);

        assert!(Block::split(b"", 4, 0).is_empty());
        assert_eq!(Block::split(b"abc", 8, 0)[0].flags, BlockFlags::SINGLE);
    }

    #[test]
    fn test_sequential_matches_single_context() {
        let data = b"tic tac toe tic tac toe tic tac toe";
        let config = MatchFinderConfig::new(12, 24).with_matches_per_index(4);
        let blocks = Block::split(data, 12, 12);
        let results = find_block_matches(&blocks, config).unwrap();

        assert_eq!(results.len(), blocks.len());
        for (block, result) in blocks.iter().zip(&results) {
            let len = block.window.len() - block.dict_size;
            assert_eq!(result.short_offsets.len(), len);
            assert_eq!(result.matches.len(), len * 4);
        }

        // Second block starts with a full repeat of the first.
        let first = results[1].matches[0];
        assert_eq!(first.offset, 12);
        assert_eq!(first.length, 12);
    }

    #[test]
    fn test_sequential_rejects_bad_config() {
        let blocks = Block::split(b"abc", 4, 0);
        assert!(find_block_matches(&blocks, MatchFinderConfig::new(0, 4)).is_err());
    }

    #[test]
    #[cfg(feature = "parallel")]
    fn test_parallel_matches_sequential() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 61) as u8).collect();
        let config = MatchFinderConfig::new(512, 1024).with_matches_per_index(8);
        let blocks = Block::split(&data, 512, 512);

        let serial = find_block_matches(&blocks, config).unwrap();
        let parallel = find_block_matches_parallel(&blocks, config).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    #[cfg(feature = "parallel")]
    fn test_parallel_rejects_bad_config() {
        let blocks = Block::split(b"abc", 4, 0);
        assert!(find_block_matches_parallel(&blocks, MatchFinderConfig::new(0, 4)).is_err());
    }
}
