//! LCP-interval tree match finder.
//!
//! Finds, for every position of a block, the earlier occurrences of the
//! bytes starting there, ready to be priced by an optimal parser. The
//! matcher works on whole windows at once:
//!
//! 1. a suffix array of the window is built through a [`SuffixSorter`];
//! 2. the LCP array is derived from it with the Φ method;
//! 3. the LCP array is folded into an implicit interval tree, in place;
//! 4. positions are enumerated in order, each one finding the positions
//!    before it through the tree and relinking the tree to itself.
//!
//! # Features
//!
//! - Fixed-stride match output with diagonal runs folded into one entry
//! - Short-offset side channel for repeat-style encodings
//! - Dictionary prefixes, skipped but matchable
//! - Pluggable suffix sorter with a `divsufsort` default
//! - One allocation per context, reused for every block
//! - Parallel multi-block search behind the `parallel` feature
//!
//! # Example
//!
//! ```
//! use oxiarc_lcpit::{BlockFlags, MatchEffort, MatchFinder, MatchFinderConfig};
//!
//! let data = b"to be or not to be, that is the question";
//! let config = MatchFinderConfig::new(64, 64).with_effort(MatchEffort::Low);
//! let mut finder = MatchFinder::new(config).unwrap();
//!
//! finder.find_all_block_matches(data, 0, BlockFlags::SINGLE).unwrap();
//!
//! // "to be" at 13 repeats the one at 0.
//! let best = finder.matches_at(13)[0];
//! assert_eq!(best.offset, 13);
//! assert!(best.length >= 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
mod enumerate;
mod lcp;
pub mod matches;
pub mod matchfinder;
pub mod packed;
pub mod sorter;
pub mod tree;

pub use batch::{Block, BlockMatches, find_block_matches};
pub use config::{MAX_WINDOW_SIZE, MIN_MATCH_SIZE, MatchEffort, MatchFinderConfig};
pub use matches::{BlockFlags, MAX_MATCH_DEPTH, Match, MatchDepth, MatchesAt, SHORT_OFFSET_LIMIT};
pub use matchfinder::MatchFinder;
pub use packed::{LCP_MAX, MAX_TREE_DEPTH, NodeRef, RefKind};
pub use sorter::DivSufSorter;
pub use tree::IntervalTree;

pub use oxiarc_core::error::{OxiArcError, Result};
pub use oxiarc_core::traits::SuffixSorter;

#[cfg(feature = "parallel")]
pub use batch::find_block_matches_parallel;
