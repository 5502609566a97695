//! # OxiArc Core
//!
//! Core components shared by the OxiArc match finding crates.
//!
//! - [`error`]: Error types and fallible buffer allocation
//! - [`traits`]: The [`SuffixSorter`] seam used by suffix-array match finders
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Parser / Encoder (downstream)                       │
//! │     Optimal parse, token selection, bitstream          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Match Finder                                        │
//! │     oxiarc-lcpit: LCP-interval tree, online enumeration│
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     OxiArcError, SuffixSorter                          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxiarc_core::error::{OxiArcError, try_alloc};
//!
//! let buf: Vec<u64> = try_alloc(1024, 0).unwrap();
//! assert_eq!(buf.len(), 1024);
//!
//! let err = OxiArcError::window_too_large(4096, 1024);
//! assert!(err.to_string().contains("4096"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod traits;

// Re-exports for convenience
pub use error::{OxiArcError, Result};
pub use traits::SuffixSorter;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{OxiArcError, Result};
    pub use crate::traits::SuffixSorter;
}
