//! Voxel sampling.
//!
//! A voxel is one grid cell: the 8 corner samples around an integer origin,
//! each paired with its physical position.

use crate::marching_cubes::CORNER_OFFSETS;
use crate::traits::VolumetricImage;
use crate::types::{GridCoord, Point3, Sample, Spacing};

/// One corner of a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VoxelVertex {
    /// Absolute position in image space.
    pub position: Point3,
    /// Scalar sample at this corner.
    pub value: Sample,
}

/// A grid cell as its 8 corners, in [`CORNER_OFFSETS`] order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Voxel {
    /// Corner vertices.
    pub vertices: [VoxelVertex; 8],
}

impl Voxel {
    /// Build a voxel from explicit corner values at `origin` with `spacing`.
    pub fn from_corner_values(origin: GridCoord, spacing: Spacing, values: [Sample; 8]) -> Self {
        let mut vertices = [VoxelVertex::default(); 8];
        for (corner, vertex) in vertices.iter_mut().enumerate() {
            vertex.position = origin.offset(CORNER_OFFSETS[corner]).to_position(spacing);
            vertex.value = values[corner];
        }
        Self { vertices }
    }

    /// Corner sample values in corner order.
    #[inline]
    pub fn values(&self) -> [Sample; 8] {
        self.vertices.map(|v| v.value)
    }
}

/// Read the voxel whose lowest corner is `origin`.
///
/// `spacing` should already be normalized; positions are
/// `corner_coord * spacing` component-wise.
///
/// # Preconditions
/// `origin.i < nx - 1`, `origin.j < ny - 1`, `origin.k < nz - 1`.
#[inline]
pub fn sample_voxel<V>(image: &V, spacing: Spacing, origin: GridCoord) -> Voxel
where
    V: VolumetricImage + ?Sized,
{
    let mut vertices = [VoxelVertex::default(); 8];
    for (corner, vertex) in vertices.iter_mut().enumerate() {
        let coord = origin.offset(CORNER_OFFSETS[corner]);
        vertex.position = coord.to_position(spacing);
        vertex.value = image.sample(coord.i, coord.j, coord.k);
    }
    Voxel { vertices }
}
