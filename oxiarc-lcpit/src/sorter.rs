//! Default suffix array builder.
//!
//! Wraps the `divsufsort` crate. Its output uses 32-bit signed indices, so
//! the sorter keeps one reusable `i32` buffer, sized once in
//! [`SuffixSorter::with_capacity`], and widens into the caller's `u64`
//! slots after each sort.

use oxiarc_core::error::{OxiArcError, Result, try_alloc};
use oxiarc_core::traits::SuffixSorter;

/// Largest window `divsufsort` can index.
pub const DIVSUFSORT_MAX_WINDOW: usize = i32::MAX as usize;

/// Suffix sorter backed by `divsufsort`.
#[derive(Debug)]
pub struct DivSufSorter {
    scratch: Vec<i32>,
}

impl DivSufSorter {
    /// Largest window this sorter was sized for.
    pub fn capacity(&self) -> usize {
        self.scratch.len()
    }
}

impl SuffixSorter for DivSufSorter {
    fn with_capacity(max_window_size: usize) -> Result<Self> {
        if max_window_size > DIVSUFSORT_MAX_WINDOW {
            return Err(OxiArcError::invalid_config(format!(
                "suffix sorter capacity {max_window_size} exceeds {DIVSUFSORT_MAX_WINDOW}"
            )));
        }

        Ok(Self {
            scratch: try_alloc(max_window_size, 0)?,
        })
    }

    fn sort(&mut self, window: &[u8], suffix_array: &mut [u64]) -> Result<()> {
        let n = window.len();
        if n > self.capacity() {
            return Err(OxiArcError::suffix_sort(format!(
                "window of {n} bytes exceeds sorter capacity {}",
                self.capacity()
            )));
        }
        if suffix_array.len() < n {
            return Err(OxiArcError::buffer_too_small(n, suffix_array.len()));
        }
        if n == 0 {
            return Ok(());
        }

        let scratch = &mut self.scratch[..n];
        divsufsort::sort_in_place(window, scratch);

        for (slot, &pos) in suffix_array[..n].iter_mut().zip(scratch.iter()) {
            *slot = u64::try_from(pos).map_err(|_| {
                OxiArcError::suffix_sort(format!("negative suffix index {pos}"))
            })?;
        }
        Ok(())
    }
}
