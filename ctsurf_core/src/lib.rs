//! # ctsurf_core
//!
//! Pure marching-cubes algorithms for reconstructing iso-surfaces from CT
//! volumes.
//!
//! This crate is the reconstruction kernel of the ctsurf workspace. It turns a
//! regular grid of 16-bit samples into an indexed triangle mesh at a chosen
//! density threshold, one voxel at a time, and provides the pieces the
//! `ctsurf` runtime needs to run that work in parallel.
//!
//! ## Features
//!
//! - **no_std compatible**: Works without the standard library via the `alloc` feature
//! - **Pure algorithms**: No image storage, just a [`VolumetricImage`] trait
//! - **Static case tables**: The canonical 256-entry edge and triangle tables
//! - **Deterministic partitioning**: Slice ranges that are disjoint and exhaustive
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables standard library support
//! - `alloc`: Enables heap allocation (Vec, etc.) without full std
//!
//! ## Modules
//!
//! - [`types`]: Core data types (Point3, GridCoord, spacing normalization)
//! - [`traits`]: Volume access trait ([`VolumetricImage`]) and corner helpers
//! - [`voxel`]: Voxel sampling from an image
//! - [`marching_cubes`]: Tables, classification, interpolation, emission
//! - [`partition`]: Worker slice ranges
//! - [`mesh`]: Indexed mesh with rebased merge (`alloc`)
//! - [`slices`]: Sequential slice-range worker (`alloc`)
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```ignore
//! use ctsurf_core::prelude::*;
//!
//! let spacing = normalize_spacing(image.spacing());
//! let total = reconstructable_slices(image.dimensions().2);
//! let mut mesh = Mesh::new();
//! for range in slice_ranges(total, 4)? {
//!     mesh.merge(reconstruct_slice_range(&image, spacing, 200, range, |_| {}));
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Conditional std/alloc support
#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

// Internal alloc prelude for conditional compilation
#[cfg(feature = "std")]
mod alloc_prelude {
    pub use std::vec::Vec;
}

#[cfg(all(feature = "alloc", not(feature = "std")))]
mod alloc_prelude {
    pub use alloc::vec::Vec;
}

pub mod error;
pub mod marching_cubes;
#[cfg(any(feature = "std", feature = "alloc"))]
pub mod mesh;
pub mod partition;
#[cfg(any(feature = "std", feature = "alloc"))]
pub mod slices;
pub mod traits;
pub mod types;
pub mod voxel;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::error::{check_dimensions, CoreError};
    pub use crate::marching_cubes::{
        case_index, interpolate_vertex, intersect_edges, process_cell_no_alloc, CaseIndex,
    };
    pub use crate::partition::{
        reconstructable_slices, slice_range, slices_per_worker, DEFAULT_MAX_WORKERS,
    };
    pub use crate::traits::VolumetricImage;
    pub use crate::types::{normalize_spacing, GridCoord, IsoValue, Point3, Sample, Spacing};
    pub use crate::voxel::{sample_voxel, Voxel, VoxelVertex};

    #[cfg(any(feature = "std", feature = "alloc"))]
    pub use crate::marching_cubes::polygonise;
    #[cfg(any(feature = "std", feature = "alloc"))]
    pub use crate::mesh::{Mesh, TriangleIndices};
    #[cfg(any(feature = "std", feature = "alloc"))]
    pub use crate::partition::slice_ranges;
    #[cfg(any(feature = "std", feature = "alloc"))]
    pub use crate::slices::{reconstruct_slice, reconstruct_slice_range};
}

// Re-export everything at crate root for convenience
pub use error::{check_dimensions, CoreError};
pub use marching_cubes::{case_index, interpolate_vertex, CaseIndex};
pub use partition::{reconstructable_slices, slice_range, slices_per_worker, DEFAULT_MAX_WORKERS};
pub use traits::{corner_from_index, index_from_corner, VolumetricImage};
pub use types::{
    normalize_spacing, GridCoord, IsoValue, Point3, Sample, Spacing, SPACING_EPSILON,
};
pub use voxel::{sample_voxel, Voxel, VoxelVertex};

#[cfg(any(feature = "std", feature = "alloc"))]
pub use mesh::{
    fits_vertex_count, rebase_triangle, rebase_triangles, Mesh, TriangleIndices, MAX_VERTICES,
};
#[cfg(any(feature = "std", feature = "alloc"))]
pub use partition::slice_ranges;
#[cfg(any(feature = "std", feature = "alloc"))]
pub use slices::{reconstruct_slice, reconstruct_slice_range};
