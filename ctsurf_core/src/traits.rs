//! Traits for volume access in ctsurf_core.
//!
//! The reconstruction kernel never owns image data. Downstream crates (the
//! `ctsurf` runtime, a DICOM reader, a resampler) implement
//! [`VolumetricImage`] over their own storage and hand it to the kernel by
//! shared reference.

use crate::types::{Sample, Spacing};

/// Read-only access to a regular 3D scalar grid.
///
/// Implementors must stay stable for the duration of one reconstruction:
/// the kernel reads the same sample from several threads and expects the
/// same answer.
///
/// # Preconditions
/// `sample(i, j, k)` is only called with `i < nx`, `j < ny`, `k < nz`.
/// Implementations may panic on out-of-range access; the kernel performs no
/// bounds validation of its own.
pub trait VolumetricImage {
    /// Number of samples per axis, `(nx, ny, nz)`. Each is expected to be ≥ 2.
    fn dimensions(&self) -> (usize, usize, usize);

    /// Physical distance between neighbouring samples per axis.
    fn spacing(&self) -> Spacing;

    /// Scalar value at grid coordinate `(i, j, k)`.
    fn sample(&self, i: usize, j: usize, k: usize) -> Sample;
}

impl<T: VolumetricImage + ?Sized> VolumetricImage for &T {
    #[inline]
    fn dimensions(&self) -> (usize, usize, usize) {
        (**self).dimensions()
    }

    #[inline]
    fn spacing(&self) -> Spacing {
        (**self).spacing()
    }

    #[inline]
    fn sample(&self, i: usize, j: usize, k: usize) -> Sample {
        (**self).sample(i, j, k)
    }
}

/// Convert a corner index (0-7) to a corner offset tuple (i, j, k).
///
/// The corner ordering follows the standard marching cubes convention:
/// ```text
/// Corner:  0      1      2      3      4      5      6      7
/// Offset: (0,0,0)(1,0,0)(1,1,0)(0,1,0)(0,0,1)(1,0,1)(1,1,1)(0,1,1)
/// ```
#[inline]
pub const fn corner_from_index(idx: usize) -> (usize, usize, usize) {
    crate::marching_cubes::CORNER_OFFSETS[idx & 7]
}

/// Convert a corner offset tuple (i, j, k) to a corner index (0-7).
///
/// This is the inverse of `corner_from_index`.
#[inline]
pub const fn index_from_corner(corner: (usize, usize, usize)) -> usize {
    match (corner.0 & 1, corner.1 & 1, corner.2 & 1) {
        (0, 0, 0) => 0,
        (1, 0, 0) => 1,
        (1, 1, 0) => 2,
        (0, 1, 0) => 3,
        (0, 0, 1) => 4,
        (1, 0, 1) => 5,
        (1, 1, 1) => 6,
        _ => 7,
    }
}
