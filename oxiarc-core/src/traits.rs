//! Core traits shared by the OxiArc match finders.
//!
//! Suffix sorting is treated as a pluggable component: match finders own a
//! sorter for the lifetime of their context and call it once per block.

use crate::error::Result;

/// A suffix array builder.
///
/// Implementations sort the positions of a window by the lexicographic order
/// of the suffixes starting there. A builder is created once with the largest
/// window it will ever see, so that any working memory it needs is reserved
/// up front and reused for every block.
pub trait SuffixSorter {
    /// Create a builder able to sort windows of up to `max_window_size` bytes.
    fn with_capacity(max_window_size: usize) -> Result<Self>
    where
        Self: Sized;

    /// Sort the suffixes of `window`.
    ///
    /// On success `suffix_array[..window.len()]` holds every position of
    /// `window` exactly once, ordered by suffix. Entries past `window.len()`
    /// are left untouched. On failure the contents of `suffix_array` are
    /// unspecified.
    fn sort(&mut self, window: &[u8], suffix_array: &mut [u64]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OxiArcError;

    /// Naive reference sorter used to check the trait contract.
    struct NaiveSorter;

    impl SuffixSorter for NaiveSorter {
        fn with_capacity(_max_window_size: usize) -> Result<Self> {
            Ok(Self)
        }

        fn sort(&mut self, window: &[u8], suffix_array: &mut [u64]) -> Result<()> {
            if suffix_array.len() < window.len() {
                return Err(OxiArcError::buffer_too_small(
                    window.len(),
                    suffix_array.len(),
                ));
            }
            let mut order: Vec<usize> = (0..window.len()).collect();
            order.sort_by(|&a, &b| window[a..].cmp(&window[b..]));
            for (slot, pos) in suffix_array.iter_mut().zip(order) {
                *slot = pos as u64;
            }
            Ok(())
        }
    }

    #[test]
    fn test_naive_sorter_banana() {
        let mut sorter = NaiveSorter::with_capacity(6).unwrap();
        let mut sa = [0u64; 6];
        sorter.sort(b"banana", &mut sa).unwrap();
        assert_eq!(sa, [5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_naive_sorter_short_buffer() {
        let mut sorter = NaiveSorter::with_capacity(6).unwrap();
        let mut sa = [0u64; 3];
        assert!(sorter.sort(b"banana", &mut sa).is_err());
    }
}
