//! # ctsurf
//!
//! Parallel marching-cubes reconstruction of CT volumes into triangle meshes.
//!
//! This crate is the runtime side of the ctsurf workspace. The per-voxel
//! kernel lives in [`ctsurf_core`]; this crate adds:
//!
//! - **Configuration**: threshold and worker count, with CT tissue presets
//! - **Volumes**: an in-memory [`VolumeGrid`] implementing [`VolumetricImage`]
//! - **Scheduling**: slice-range workers on a dedicated rayon pool
//! - **Merging**: deterministic, worker-ordered fragment merge with parallel
//!   index rebasing
//! - **Progress**: observer hooks and an mpsc channel with whole-percent
//!   aggregation
//!
//! ## Quick Start
//!
//! ```ignore
//! use ctsurf::prelude::*;
//!
//! let volume = VolumeGrid::new((512, 512, 300), [0.7, 0.7, 1.25], samples)?;
//! let config = ReconstructionConfig::from_preset(TissuePreset::Bone).with_max_workers(8);
//! let mesh = MarchingCubes::new(config)?.reconstruct(&volume)?;
//!
//! let stats = MeshStats::from_mesh(&mesh);
//! println!("{} triangles, area {:.1}", stats.triangle_count, stats.surface_area);
//! ```
//!
//! ## Progress
//!
//! ```ignore
//! let (observer, mut receiver) = progress_channel();
//! let ui = std::thread::spawn(move || receiver.forward_to(&progress_bar));
//! let mesh = mc.reconstruct_with_observer(&volume, &observer)?;
//! drop(observer);
//! ui.join().unwrap();
//! ```
//!
//! ## Determinism
//!
//! For a given volume, threshold and worker count the output mesh is
//! bit-identical across runs. Different worker counts give the same set of
//! triangles; with the in-order merge they give the identical mesh.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`ReconstructionConfig`] and
//!   [`TissuePreset`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod mesh;
pub mod progress;
pub mod reconstruct;
pub mod volume;

pub use config::{ReconstructionConfig, TissuePreset};
pub use error::{ReconstructError, Result};
pub use mesh::{merge_fragments, merge_parallel, MeshStats};
pub use progress::{
    progress_channel, ChannelObserver, NoopObserver, ProgressAggregator, ProgressEvent,
    ProgressReceiver, ReconstructionObserver,
};
pub use reconstruct::{reconstruct, MarchingCubes};
pub use volume::VolumeGrid;

// Re-export commonly used kernel types
pub use ctsurf_core::{
    CoreError, IsoValue, Mesh, Point3, Sample, Spacing, TriangleIndices, VolumetricImage,
    DEFAULT_MAX_WORKERS, SPACING_EPSILON,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{ReconstructionConfig, TissuePreset};
    pub use crate::error::{ReconstructError, Result};
    pub use crate::mesh::MeshStats;
    pub use crate::progress::{progress_channel, ProgressEvent, ReconstructionObserver};
    pub use crate::reconstruct::MarchingCubes;
    pub use crate::volume::VolumeGrid;
    pub use ctsurf_core::{Mesh, Point3, VolumetricImage};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(dim: usize, radius: f32, spacing: Spacing) -> VolumeGrid {
        let c = (dim - 1) as f32 * 0.5;
        VolumeGrid::from_fn((dim, dim, dim), spacing, |i, j, k| {
            let r = Point3::new(i as f32 - c, j as f32 - c, k as f32 - c).length();
            // Linear falloff: 1000 at the centre, 0 at `radius`.
            (1000.0 * (1.0 - r / radius)).clamp(-1000.0, 1000.0) as Sample
        })
        .unwrap()
    }

    #[test]
    fn test_sphere_surface_area() {
        let volume = sphere(24, 8.0, [1.0; 3]);
        let mesh = MarchingCubes::new(ReconstructionConfig::new(0).with_max_workers(4))
            .unwrap()
            .reconstruct(&volume)
            .unwrap();
        let stats = MeshStats::from_mesh(&mesh);

        let expected = 4.0 * std::f32::consts::PI * 8.0 * 8.0;
        let rel = (stats.surface_area - expected).abs() / expected;
        assert!(rel < 0.05, "area {} vs {}", stats.surface_area, expected);

        let extent = stats.extent();
        assert!((extent.x - 16.0).abs() < 0.5, "extent {:?}", extent);
    }

    #[test]
    fn test_anisotropic_spacing_scales_extent() {
        let volume = sphere(16, 5.0, [0.5, 0.5, 2.0]);
        let mesh = reconstruct(&volume, ReconstructionConfig::new(0).with_max_workers(3)).unwrap();
        let extent = MeshStats::from_mesh(&mesh).extent();

        assert!((extent.x - 5.0).abs() < 0.3, "extent {:?}", extent);
        assert!((extent.z - 20.0).abs() < 1.2, "extent {:?}", extent);
    }

    #[test]
    fn test_worker_count_does_not_change_mesh() {
        let volume = sphere(14, 5.0, [1.0; 3]);
        let one = reconstruct(&volume, ReconstructionConfig::new(0).with_max_workers(1)).unwrap();
        let eight = reconstruct(&volume, ReconstructionConfig::new(0).with_max_workers(8)).unwrap();
        assert_eq!(one, eight);
    }
}
