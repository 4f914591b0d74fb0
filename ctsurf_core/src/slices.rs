//! Slice-range worker.
//!
//! Sequentially reconstructs every cell whose origin lies in a contiguous
//! range of Z-slices, producing a private mesh fragment. Fragment indices are
//! local to the fragment until it is merged.

use core::ops::Range;

use crate::marching_cubes::polygonise;
use crate::mesh::Mesh;
use crate::traits::VolumetricImage;
use crate::types::{GridCoord, IsoValue, Spacing};
use crate::voxel::sample_voxel;

/// Append the cells of slice `k` to `mesh`.
///
/// Cells are visited with `i` (x) in the outer loop and `j` (y) in the inner
/// loop. Returns the number of triangles added.
pub fn reconstruct_slice<V>(
    image: &V,
    spacing: Spacing,
    iso_value: IsoValue,
    k: usize,
    mesh: &mut Mesh,
) -> usize
where
    V: VolumetricImage + ?Sized,
{
    let (nx, ny, _) = image.dimensions();
    let mut added = 0;

    for i in 0..nx.saturating_sub(1) {
        for j in 0..ny.saturating_sub(1) {
            let voxel = sample_voxel(image, spacing, GridCoord::new(i, j, k));
            added += polygonise(&voxel, iso_value, mesh);
        }
    }

    added
}

/// Reconstruct the slices in `slices` into a new fragment.
///
/// `on_slice_done` is called with the slice index after each slice completes,
/// on the calling thread.
pub fn reconstruct_slice_range<V, F>(
    image: &V,
    spacing: Spacing,
    iso_value: IsoValue,
    slices: Range<usize>,
    mut on_slice_done: F,
) -> Mesh
where
    V: VolumetricImage + ?Sized,
    F: FnMut(usize),
{
    let mut mesh = Mesh::new();
    for k in slices {
        reconstruct_slice(image, spacing, iso_value, k, &mut mesh);
        on_slice_done(k);
    }
    mesh
}
