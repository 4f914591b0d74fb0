//! Parallel reconstruction scheduler.
//!
//! The `T = nz - 1` reconstructable slices are split into `max_workers`
//! contiguous ranges. Every range runs as one task on a dedicated pool of
//! exactly `max_workers` threads and produces a private fragment. After all
//! tasks join, fragments are merged in worker order, so the result does not
//! depend on thread scheduling.

use std::time::Instant;

use ctsurf_core::{
    check_dimensions, normalize_spacing, reconstruct_slice_range, reconstructable_slices,
    slice_ranges, slices_per_worker, Mesh, VolumetricImage,
};
use rayon::prelude::*;

use crate::config::ReconstructionConfig;
use crate::error::Result;
use crate::mesh::merge_fragments;
use crate::progress::{NoopObserver, ReconstructionObserver};

/// Marching-cubes reconstructor with its own worker pool.
///
/// # Example
///
/// ```ignore
/// let mc = MarchingCubes::new(ReconstructionConfig::from_preset(TissuePreset::Bone))?;
/// let mesh = mc.reconstruct(&volume)?;
/// println!("{} triangles", mesh.triangle_count());
/// ```
#[derive(Debug)]
pub struct MarchingCubes {
    config: ReconstructionConfig,
    pool: rayon::ThreadPool,
}

impl MarchingCubes {
    /// Validate `config` and start `config.max_workers` worker threads.
    pub fn new(config: ReconstructionConfig) -> Result<Self> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_workers)
            .thread_name(|i| format!("ctsurf-worker-{}", i))
            .build()?;
        Ok(Self { config, pool })
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    /// Merge fragments in order on this reconstructor's worker pool.
    pub fn merge(&self, fragments: Vec<Mesh>) -> Mesh {
        self.pool.install(|| merge_fragments(fragments))
    }

    /// Reconstruct the iso-surface of `image` without progress reporting.
    pub fn reconstruct<V>(&self, image: &V) -> Result<Mesh>
    where
        V: VolumetricImage + Sync + ?Sized,
    {
        self.reconstruct_with_observer(image, &NoopObserver)
    }

    /// Reconstruct the iso-surface of `image`, reporting to `observer`.
    ///
    /// Notification order: `on_reconstruction_started`, one
    /// `on_progress_delta(worker, 1 / T)` per slice from the worker threads,
    /// `on_progress(1.0)` once the merge is done, `on_reconstruction_finished`.
    ///
    /// # Errors
    /// Fails before any work starts when a dimension of `image` is below 2.
    pub fn reconstruct_with_observer<V, O>(&self, image: &V, observer: &O) -> Result<Mesh>
    where
        V: VolumetricImage + Sync + ?Sized,
        O: ReconstructionObserver + ?Sized,
    {
        let dims = image.dimensions();
        check_dimensions(dims)?;

        let raw_spacing = image.spacing();
        let spacing = normalize_spacing(raw_spacing);
        if spacing != raw_spacing {
            log::debug!(
                "Degenerate spacing {:?} normalized to {:?}",
                raw_spacing,
                spacing
            );
        }

        let iso_value = self.config.iso_value;
        let workers = self.config.max_workers;
        let total = reconstructable_slices(dims.2);
        let ranges = slice_ranges(total, workers)?;
        log::debug!(
            "Partitioned {} slices of a {}x{}x{} volume over {} workers ({} per worker)",
            total,
            dims.0,
            dims.1,
            dims.2,
            workers,
            slices_per_worker(total, workers)
        );

        let step = if total == 0 { 0.0 } else { 1.0 / total as f32 };
        let start = Instant::now();
        observer.on_reconstruction_started();

        let fragments: Vec<Mesh> = self.pool.install(|| {
            ranges
                .into_par_iter()
                .enumerate()
                .map(|(worker, range)| {
                    reconstruct_slice_range(image, spacing, iso_value, range, |_| {
                        observer.on_progress_delta(worker, step)
                    })
                })
                .collect()
        });
        let extracted = start.elapsed();

        let mesh = self.merge(fragments);
        observer.on_progress(1.0);
        observer.on_reconstruction_finished();

        log::info!(
            "Reconstructed {} triangles, {} vertices at iso {} in {:.2?} (merge {:.2?})",
            mesh.triangle_count(),
            mesh.vertex_count(),
            iso_value,
            start.elapsed(),
            start.elapsed().saturating_sub(extracted)
        );

        Ok(mesh)
    }
}

/// One-shot reconstruction with a temporary pool.
pub fn reconstruct<V>(image: &V, config: ReconstructionConfig) -> Result<Mesh>
where
    V: VolumetricImage + Sync + ?Sized,
{
    MarchingCubes::new(config)?.reconstruct(image)
}
