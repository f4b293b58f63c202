//! Partitioning of paths across workers.
//!
//! Worker `i` owns a contiguous block of path indices and its own RNG stream
//! [`PricerRng::for_worker`](crate::rng::PricerRng::for_worker)`(seed, i)`.
//! Partial results are always combined in worker-index order, so a run is
//! bit-identical whatever the size of the rayon thread pool.

use std::ops::Range;

use pricer_core::math::statistics::SampleStats;

/// Splits `n_paths` into contiguous blocks, one per worker.
///
/// Counts are as even as possible: the first `n_paths % num_workers`
/// workers take one extra path. Workers that would receive no paths are
/// dropped, so every returned range is non-empty.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::split_paths;
///
/// assert_eq!(split_paths(10, 3), vec![0..4, 4..7, 7..10]);
/// assert_eq!(split_paths(2, 8), vec![0..1, 1..2]);
/// ```
pub fn split_paths(n_paths: usize, num_workers: usize) -> Vec<Range<usize>> {
    let workers = num_workers.max(1);
    let base = n_paths / workers;
    let rem = n_paths % workers;

    let mut start = 0;
    (0..workers)
        .map(|i| if i < rem { base + 1 } else { base })
        .filter(|&count| count > 0)
        .map(|count| {
            let block = start..start + count;
            start += count;
            block
        })
        .collect()
}

/// Merges per-worker statistics in the order given.
pub(crate) fn merge_in_order<'a, I>(parts: I) -> SampleStats
where
    I: IntoIterator<Item = &'a SampleStats>,
{
    parts.into_iter().fold(SampleStats::new(), |mut acc, part| {
        acc.merge(part);
        acc
    })
}
