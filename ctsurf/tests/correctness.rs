//! Property-based tests for partitioning, merging and parallel reconstruction.

use ctsurf::{merge_fragments, reconstruct, Mesh, Point3, ReconstructionConfig, VolumeGrid};
use ctsurf_core::{
    normalize_spacing, reconstruct_slice_range, reconstructable_slices, slice_ranges,
    VolumetricImage,
};
use proptest::prelude::*;

/// Random volume with up to 6 samples per axis.
fn volume_strategy() -> impl Strategy<Value = VolumeGrid> {
    (2usize..7, 2usize..7, 2usize..7)
        .prop_flat_map(|dims| {
            let len = dims.0 * dims.1 * dims.2;
            (
                Just(dims),
                prop::array::uniform3(0.1f32..3.0),
                prop::collection::vec(-300i16..300, len),
            )
        })
        .prop_map(|(dims, spacing, samples)| VolumeGrid::new(dims, spacing, samples).unwrap())
}

/// Triangles as sorted, bit-exact position keys.
fn geometric_triangles(mesh: &Mesh) -> Vec<[[u32; 3]; 3]> {
    let key = |p: Point3| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
    let mut tris: Vec<_> = mesh
        .triangle_positions()
        .map(|[a, b, c]| [key(a), key(b), key(c)])
        .collect();
    tris.sort_unstable();
    tris
}

fn fragment(triangles: usize, base: f32) -> Mesh {
    let mut mesh = Mesh::new();
    for t in 0..triangles {
        let x = base + t as f32;
        let a = mesh.push_vertex(Point3::new(x, 0.0, 0.0));
        let b = mesh.push_vertex(Point3::new(x, 1.0, 0.0));
        let c = mesh.push_vertex(Point3::new(x, 0.0, 1.0));
        mesh.push_triangle([c, a, b]);
    }
    mesh
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Slice ranges are contiguous, ordered and cover [0, T) exactly once.
    #[test]
    fn partition_covers_every_slice(total in 0usize..2000, workers in 1usize..64) {
        let ranges = slice_ranges(total, workers).unwrap();
        prop_assert_eq!(ranges.len(), workers);

        let mut next = 0;
        for range in &ranges {
            prop_assert_eq!(range.start, next);
            prop_assert!(range.start <= range.end);
            next = range.end;
        }
        prop_assert_eq!(next, total);
    }

    /// Every index stays in bounds no matter how many fragments are merged.
    #[test]
    fn merge_keeps_indices_valid(sizes in prop::collection::vec(0usize..40, 0..12)) {
        let fragments: Vec<Mesh> = sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| fragment(n, i as f32 * 100.0))
            .collect();
        let mesh = merge_fragments(fragments);

        let triangles: usize = sizes.iter().sum();
        prop_assert_eq!(mesh.triangle_count(), triangles);
        prop_assert_eq!(mesh.vertex_count(), triangles * 3);
        prop_assert!(mesh.validate().is_ok());
    }

    /// One worker and eight workers produce the same triangles.
    #[test]
    fn worker_count_preserves_triangles(volume in volume_strategy(), iso in -100i16..100) {
        let one = reconstruct(&volume, ReconstructionConfig::new(iso).with_max_workers(1)).unwrap();
        let eight = reconstruct(&volume, ReconstructionConfig::new(iso).with_max_workers(8)).unwrap();

        prop_assert_eq!(geometric_triangles(&one), geometric_triangles(&eight));
        prop_assert!(eight.validate().is_ok());
    }

    /// The parallel result is the sequential kernel's result.
    #[test]
    fn parallel_matches_sequential_kernel(
        volume in volume_strategy(),
        iso in -100i16..100,
        workers in 1usize..10,
    ) {
        let parallel =
            reconstruct(&volume, ReconstructionConfig::new(iso).with_max_workers(workers)).unwrap();

        let total = reconstructable_slices(volume.dimensions().2);
        let spacing = normalize_spacing(volume.spacing());
        let sequential = reconstruct_slice_range(&volume, spacing, iso, 0..total, |_| {});

        prop_assert_eq!(parallel, sequential);
    }

    /// Vertices lie inside the volume's physical extent.
    #[test]
    fn vertices_stay_inside_volume(volume in volume_strategy(), iso in -100i16..100) {
        let mesh = reconstruct(&volume, ReconstructionConfig::new(iso).with_max_workers(3)).unwrap();
        let (nx, ny, nz) = volume.dimensions();
        let s = volume.spacing();
        let max = Point3::new(
            (nx - 1) as f32 * s[0],
            (ny - 1) as f32 * s[1],
            (nz - 1) as f32 * s[2],
        );
        for v in mesh.vertices() {
            prop_assert!(v.x >= 0.0 && v.y >= 0.0 && v.z >= 0.0, "{:?}", v);
            prop_assert!(
                v.x <= max.x + 1e-4 && v.y <= max.y + 1e-4 && v.z <= max.z + 1e-4,
                "{:?} outside {:?}",
                v,
                max
            );
        }
    }

    /// Near-zero spacing on any axis behaves like unit spacing.
    #[test]
    fn degenerate_spacing_is_unit(
        spacing in prop::array::uniform3(0.1f32..3.0),
        axis in 0usize..3,
        tiny in -9.9e-8f32..9.9e-8,
    ) {
        let mut degenerate = spacing;
        degenerate[axis] = tiny;
        let mut unit = spacing;
        unit[axis] = 1.0;

        prop_assert_eq!(normalize_spacing(degenerate), unit);
        prop_assert_eq!(normalize_spacing(spacing), spacing);
    }
}

#[test]
fn zero_spacing_reconstructs_like_unit_spacing() {
    let f = |i: usize, j: usize, k: usize| ((i * 37 + j * 11 + k * 5) % 17) as i16 * 40 - 320;
    let zero = VolumeGrid::from_fn((5, 4, 6), [0.0, 0.4, 1.5], f).unwrap();
    let unit = VolumeGrid::from_fn((5, 4, 6), [1.0, 0.4, 1.5], f).unwrap();

    let config = ReconstructionConfig::new(0).with_max_workers(4);
    let a = reconstruct(&zero, config).unwrap();
    let b = reconstruct(&unit, config).unwrap();

    assert!(!a.is_empty());
    assert_eq!(a, b);
}
