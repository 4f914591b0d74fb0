//! Marching Cubes cell processing.
//!
//! This module provides the per-voxel marching cubes logic for turning CT
//! samples into triangles. It includes:
//!
//! - Compile-time lookup tables for the 256 cube configurations
//! - Case classification with an inclusive `>=` threshold rule
//! - Edge interpolation and triangle emission into a [`Mesh`](crate::mesh::Mesh)
//! - A no-alloc variant returning triangle positions directly
//!
//! # Example
//!
//! ```ignore
//! use ctsurf_core::marching_cubes::{case_index, polygonise};
//!
//! let case = case_index(&voxel, 200);
//! let added = polygonise(&voxel, 200, &mut fragment);
//! ```

mod algorithm;
mod tables;

pub use algorithm::{
    case_index, case_triangles, interpolate_vertex, intersect_edges, is_trivial_case,
    process_cell_no_alloc, triangle_count, CaseIndex, EdgeIntersections, EdgePoint,
};
pub use tables::{
    ALL_EDGES, CHECKERBOARD_CASES, CORNER_OFFSETS, EDGE_COUNT, EDGE_TABLE, EDGE_VERTICES, MAX_TRIANGLES_PER_CASE,
    NO_EDGES, TRIANGLE_SENTINEL, TRI_TABLE,
};

#[cfg(any(feature = "std", feature = "alloc"))]
pub use algorithm::{emit_triangles, polygonise};
