//! Slice-range partitioning for the worker pool.
//!
//! Cells are started from slices `0..nz-1` (the last slice has no slice above
//! it). These `T = nz - 1` slices are split into `W` contiguous half-open
//! ranges of `ceil(T / W)` slices each; trailing workers may receive empty
//! ranges when `T` is small.

use core::ops::Range;

#[cfg(any(feature = "std", feature = "alloc"))]
use crate::alloc_prelude::Vec;
#[cfg(any(feature = "std", feature = "alloc"))]
use crate::error::CoreError;

/// Default bound on concurrently running slice workers.
pub const DEFAULT_MAX_WORKERS: usize = 20;

/// Number of slices that can start a cell for a volume with `nz` slices.
#[inline]
pub const fn reconstructable_slices(nz: usize) -> usize {
    nz.saturating_sub(1)
}

/// Slices assigned to each worker: `ceil(total / workers)`.
///
/// A worker count of zero is treated as one.
#[inline]
pub const fn slices_per_worker(total: usize, workers: usize) -> usize {
    let workers = if workers == 0 { 1 } else { workers };
    total.div_ceil(workers)
}

/// Half-open slice range of worker `worker`.
///
/// Both ends are clamped to `total`, so workers past the end get an empty
/// range `total..total`.
#[inline]
pub const fn slice_range(worker: usize, total: usize, workers: usize) -> Range<usize> {
    let per = slices_per_worker(total, workers);
    let start = min(worker.saturating_mul(per), total);
    let end = min(worker.saturating_add(1).saturating_mul(per), total);
    start..end
}

/// Ranges for all `workers` workers, in worker order.
///
/// # Errors
/// Returns [`CoreError::ZeroWorkers`] when `workers == 0`.
#[cfg(any(feature = "std", feature = "alloc"))]
pub fn slice_ranges(total: usize, workers: usize) -> Result<Vec<Range<usize>>, CoreError> {
    if workers == 0 {
        return Err(CoreError::ZeroWorkers);
    }
    Ok((0..workers)
        .map(|worker| slice_range(worker, total, workers))
        .collect())
}

const fn min(a: usize, b: usize) -> usize {
    if a < b {
        a
    } else {
        b
    }
}
