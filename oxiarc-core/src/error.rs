//! Error types for OxiArc operations.
//!
//! Match finding has very few failure modes: the suffix sorter can fail for
//! a block, buffer reservation can fail while a context is being set up, and
//! callers can hand in windows or output buffers that do not fit. Everything
//! else is a caller contract (positions presented in increasing order) and is
//! not reported through this type.

use thiserror::Error;

/// The main error type for OxiArc operations.
#[derive(Debug, Error)]
pub enum OxiArcError {
    /// The suffix array builder failed for the current block.
    ///
    /// No output for that block is valid, but the context that owns the
    /// builder may be reused for the next block.
    #[error("Suffix array construction failed: {message}")]
    SuffixSort {
        /// Description reported by the builder.
        message: String,
    },

    /// A fixed-capacity buffer could not be reserved.
    #[error("Allocation of {bytes} bytes failed")]
    Allocation {
        /// Number of bytes requested.
        bytes: usize,
    },

    /// Configuration values are out of range.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the offending value.
        message: String,
    },

    /// A window is larger than the capacity the context was built for.
    #[error("Window of {size} bytes exceeds capacity of {capacity} bytes")]
    WindowTooLarge {
        /// Size of the window handed in.
        size: usize,
        /// Maximum window size of the context.
        capacity: usize,
    },

    /// Buffer too small for operation.
    #[error("Buffer too small: need {needed} slots, have {available}")]
    BufferTooSmall {
        /// Number of slots needed.
        needed: usize,
        /// Number of slots available.
        available: usize,
    },
}

/// Result type alias for OxiArc operations.
pub type Result<T> = std::result::Result<T, OxiArcError>;

impl OxiArcError {
    /// Create a suffix sort error.
    pub fn suffix_sort(message: impl Into<String>) -> Self {
        Self::SuffixSort {
            message: message.into(),
        }
    }

    /// Create an allocation error.
    pub fn allocation(bytes: usize) -> Self {
        Self::Allocation { bytes }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a window too large error.
    pub fn window_too_large(size: usize, capacity: usize) -> Self {
        Self::WindowTooLarge { size, capacity }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }
}

/// Reserve exactly `len` elements in a fresh vector and fill it with `value`.
///
/// Unlike `vec![value; len]` this reports exhaustion as
/// [`OxiArcError::Allocation`] instead of aborting the process.
pub fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| OxiArcError::allocation(len.saturating_mul(size_of::<T>())))?;
    buf.resize(len, value);
    Ok(buf)
}
