//! Criterion benchmarks for ctsurf reconstruction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ctsurf::{merge_fragments, MarchingCubes, Mesh, Point3, ReconstructionConfig, VolumeGrid};
use ctsurf_core::{
    marching_cubes::process_cell_no_alloc, normalize_spacing, sample_voxel, GridCoord,
    VolumetricImage,
};

/// Ball of bone-like density with a soft shell, in air.
fn make_phantom(dim: usize) -> VolumeGrid {
    let c = (dim - 1) as f32 * 0.5;
    let r = dim as f32 * 0.35;
    VolumeGrid::from_fn((dim, dim, dim), [0.7, 0.7, 1.25], |i, j, k| {
        let d = Point3::new(i as f32 - c, j as f32 - c, k as f32 - c).length();
        if d < r * 0.8 {
            700
        } else if d < r {
            40
        } else {
            -1000
        }
    })
    .unwrap()
}

fn bench_cell(c: &mut Criterion) {
    let volume = make_phantom(32);
    let spacing = normalize_spacing(volume.spacing());
    // A cell on the bone boundary along the x axis.
    let origin = GridCoord::new(5, 15, 15);
    let voxel = sample_voxel(&volume, spacing, origin);

    c.bench_function("process_cell_no_alloc", |b| {
        b.iter(|| black_box(process_cell_no_alloc(black_box(&voxel), 200)))
    });
}

fn bench_worker_scaling(c: &mut Criterion) {
    let volume = make_phantom(96);
    let (nx, ny, nz) = volume.dimensions();
    let cells = ((nx - 1) * (ny - 1) * (nz - 1)) as u64;

    let mut group = c.benchmark_group("reconstruct_96");
    group.throughput(Throughput::Elements(cells));
    group.sample_size(20);

    for workers in [1, 2, 4, 8, 20] {
        let mc = MarchingCubes::new(ReconstructionConfig::new(200).with_max_workers(workers))
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| black_box(mc.reconstruct(&volume).unwrap()))
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let volume = make_phantom(64);
    let mc = MarchingCubes::new(ReconstructionConfig::new(40).with_max_workers(1)).unwrap();
    let mesh = mc.reconstruct(&volume).unwrap();
    let fragments: Vec<Mesh> = (0..20).map(|_| mesh.clone()).collect();

    c.bench_function("merge_20_fragments", |b| {
        b.iter_batched(
            || fragments.clone(),
            |fragments| black_box(merge_fragments(fragments)),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_cell, bench_worker_scaling, bench_merge);
criterion_main!(benches);
