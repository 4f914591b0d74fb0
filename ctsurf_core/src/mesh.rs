//! Indexed triangle mesh.
//!
//! Append-only container produced by the slice workers. Vertices are stored
//! in insertion order with no deduplication; triangles hold 0-based indices
//! into the vertex list.

use crate::alloc_prelude::Vec;
use crate::error::CoreError;
use crate::types::Point3;

/// Three 0-based vertex indices.
///
/// Indices are `u32`, so a mesh holds at most [`MAX_VERTICES`] vertices.
pub type TriangleIndices = [u32; 3];

/// Largest vertex count a [`Mesh`] can address.
pub const MAX_VERTICES: usize = u32::MAX as usize;

/// Whether `count` vertices are addressable by [`TriangleIndices`].
#[inline]
pub const fn fits_vertex_count(count: usize) -> bool {
    count <= MAX_VERTICES
}

/// Vertices plus index triangles.
///
/// Invariant: every triangle index is `< vertex_count()`, and
/// `vertex_count() <= MAX_VERTICES`. Exceeding the limit panics in debug
/// builds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3>,
    triangles: Vec<TriangleIndices>,
}

impl Mesh {
    /// Create an empty mesh.
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create an empty mesh with reserved storage.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Append a vertex and return its index.
    #[inline]
    pub fn push_vertex(&mut self, position: Point3) -> u32 {
        let index = self.next_vertex_index();
        self.vertices.push(position);
        index
    }

    /// Index the next pushed vertex will receive.
    #[inline]
    pub fn next_vertex_index(&self) -> u32 {
        debug_assert!(
            fits_vertex_count(self.vertices.len() + 1),
            "mesh exceeds {} vertices",
            MAX_VERTICES
        );
        self.vertices.len() as u32
    }

    /// Append a triangle.
    #[inline]
    pub fn push_triangle(&mut self, triangle: TriangleIndices) {
        debug_assert!(
            triangle.iter().all(|&i| (i as usize) < self.vertices.len()),
            "triangle {:?} references a missing vertex",
            triangle
        );
        self.triangles.push(triangle);
    }

    /// Vertices in insertion order.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Triangles in insertion order.
    #[inline]
    pub fn triangles(&self) -> &[TriangleIndices] {
        &self.triangles
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh holds neither vertices nor triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Iterate triangles as vertex positions.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.triangles.iter().map(move |t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }

    /// Append `other`, shifting its triangle indices past this mesh's vertices.
    pub fn merge(&mut self, other: Mesh) {
        self.merge_with(other, rebase_triangles);
    }

    /// Append `other`, delegating the index shift to `rebase`.
    ///
    /// `rebase` receives exactly the appended triangles and the vertex count
    /// this mesh had before the append. Each triangle is independent, so a
    /// parallel `rebase` gives the same result as [`rebase_triangles`].
    pub fn merge_with<F>(&mut self, other: Mesh, rebase: F)
    where
        F: FnOnce(&mut [TriangleIndices], u32),
    {
        if self.is_empty() {
            *self = other;
            return;
        }

        debug_assert!(
            fits_vertex_count(self.vertices.len().saturating_add(other.vertices.len())),
            "merged mesh exceeds {} vertices",
            MAX_VERTICES
        );
        let offset = self.vertices.len() as u32;
        let first_new = self.triangles.len();

        self.vertices.extend(other.vertices);
        self.triangles.extend(other.triangles);

        if offset != 0 {
            rebase(&mut self.triangles[first_new..], offset);
        }
    }

    /// Check the index invariant.
    pub fn validate(&self) -> Result<(), CoreError> {
        let vertex_count = self.vertices.len();
        for (triangle, indices) in self.triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(CoreError::TriangleIndexOutOfBounds {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Decompose into vertex and triangle vectors.
    pub fn into_parts(self) -> (Vec<Point3>, Vec<TriangleIndices>) {
        (self.vertices, self.triangles)
    }
}

/// Add `offset` to every index of every triangle.
#[inline]
pub fn rebase_triangles(triangles: &mut [TriangleIndices], offset: u32) {
    for triangle in triangles {
        rebase_triangle(triangle, offset);
    }
}

/// Add `offset` to the three indices of one triangle.
#[inline]
pub fn rebase_triangle(triangle: &mut TriangleIndices, offset: u32) {
    for index in triangle.iter_mut() {
        *index += offset;
    }
}
