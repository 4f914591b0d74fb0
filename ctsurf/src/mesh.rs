//! Parallel fragment merging and mesh statistics.

use ctsurf_core::{rebase_triangle, Mesh, Point3};
use rayon::prelude::*;

/// Below this many triangles rebasing stays on the calling thread.
const PAR_REBASE_MIN_LEN: usize = 4096;

/// Append `fragment` to `target`, rebasing its triangles in parallel.
///
/// Produces exactly the same mesh as [`Mesh::merge`].
pub fn merge_parallel(target: &mut Mesh, fragment: Mesh) {
    target.merge_with(fragment, |triangles, offset| {
        triangles
            .par_iter_mut()
            .with_min_len(PAR_REBASE_MIN_LEN)
            .for_each(|triangle| rebase_triangle(triangle, offset));
    });
}

/// Fold fragments into one mesh, in iteration order.
pub fn merge_fragments<I>(fragments: I) -> Mesh
where
    I: IntoIterator<Item = Mesh>,
{
    let mut mesh = Mesh::new();
    for fragment in fragments {
        merge_parallel(&mut mesh, fragment);
    }
    mesh
}

/// Statistics about a reconstructed mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Approximate surface area (sum of triangle areas).
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics from a mesh.
    ///
    /// An empty mesh has an inverted bounding box (`min > max`).
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut bbox_min = Point3::splat(f32::MAX);
        let mut bbox_max = Point3::splat(f32::MIN);
        for &v in mesh.vertices() {
            bbox_min = bbox_min.min(v);
            bbox_max = bbox_max.max(v);
        }

        let surface_area = mesh
            .triangle_positions()
            .map(|[a, b, c]| (b - a).cross(c - a).length() * 0.5)
            .sum();

        Self {
            triangle_count: mesh.triangle_count(),
            vertex_count: mesh.vertex_count(),
            surface_area,
            bbox_min,
            bbox_max,
        }
    }

    /// Bounding box extent, or zero for an empty mesh.
    pub fn extent(&self) -> Point3 {
        if self.vertex_count == 0 {
            Point3::splat(0.0)
        } else {
            self.bbox_max - self.bbox_min
        }
    }
}
