//! Suffix array and LCP derivation.
//!
//! The LCP array is computed with Kärkkäinen's Φ method: Φ maps each
//! position to the position of its lexicographic predecessor, which lets the
//! permuted LCP (PLCP) be computed in text order. Consecutive PLCP values
//! drop by at most one, so the total comparison work is linear, and no
//! inverse suffix array is ever built. PLCP is then rotated into rank order.
//!
//! Storage is reused across phases: `intervals` receives the suffix array
//! and ends up holding packed `(position, tagged length)` entries by rank;
//! `pos_data` holds Φ and then PLCP.

use crate::packed::{NodeRef, tagged_depth};
use oxiarc_core::error::Result;
use oxiarc_core::traits::SuffixSorter;

/// Φ value of the lexicographically smallest suffix.
const NO_PREDECESSOR: u64 = u64::MAX;

/// Sort `window` and replace the suffix array with packed rank entries.
///
/// On return, `intervals[r]` is the position of the rank-`r` suffix packed
/// with the tagged LCP it shares with the rank-`r - 1` suffix. Lengths below
/// `min_match` are stored as zero and lengths above
/// [`LCP_MAX`](crate::packed::LCP_MAX) are clamped. `intervals[0]` carries
/// no depth. The contents of `pos_data[..window.len()]` are scratch
/// afterwards.
pub(crate) fn build_suffix_array<S: SuffixSorter>(
    sorter: &mut S,
    window: &[u8],
    intervals: &mut [u64],
    pos_data: &mut [u64],
    min_match: usize,
) -> Result<()> {
    let n = window.len();
    if n == 0 {
        return Ok(());
    }

    let intervals = &mut intervals[..n];
    sorter.sort(window, intervals)?;

    let phi = &mut pos_data[..n];
    phi[intervals[0] as usize] = NO_PREDECESSOR;
    for r in 1..n {
        phi[intervals[r] as usize] = intervals[r - 1];
    }

    // PLCP overwrites Φ in place; each slot is read once, just before it
    // is replaced.
    let mut cur_len = 0usize;
    for i in 0..n {
        let prev = phi[i];
        if prev == NO_PREDECESSOR {
            phi[i] = 0;
            cur_len = 0;
            continue;
        }

        let j = prev as usize;
        let max_len = n - i.max(j);
        while cur_len < max_len && window[i + cur_len] == window[j + cur_len] {
            cur_len += 1;
        }
        phi[i] = cur_len as u64;
        cur_len = cur_len.saturating_sub(1);
    }
    let plcp = phi;

    for r in 1..n {
        let pos = intervals[r] as usize;
        let mut len = plcp[pos] as usize;
        if len < min_match {
            len = 0;
        }
        intervals[r] = NodeRef::packed(pos, tagged_depth(len, pos)).raw();
    }

    Ok(())
}
