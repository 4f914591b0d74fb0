//! Marching Cubes per-cell algorithm.
//!
//! Classification, edge interpolation and triangle emission for a single
//! voxel. The slice worker in [`crate::slices`] drives these over a range of
//! cells.

use crate::types::{IsoValue, Point3, Sample};
use crate::voxel::Voxel;

#[cfg(any(feature = "std", feature = "alloc"))]
use crate::mesh::Mesh;

use super::tables::{
    ALL_EDGES, EDGE_COUNT, EDGE_TABLE, EDGE_VERTICES, MAX_TRIANGLES_PER_CASE, NO_EDGES,
    TRIANGLE_SENTINEL, TRI_TABLE,
};

/// 8-bit case index; bit `v` is set when corner `v` is inside the surface.
pub type CaseIndex = u8;

/// An interpolated edge crossing and its fragment-local vertex index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePoint {
    /// Crossing position.
    pub position: Point3,
    /// Index the point receives in the owning mesh fragment.
    pub index: u32,
}

/// Crossing per voxel edge; `None` for edges the surface does not cross.
pub type EdgeIntersections = [Option<EdgePoint>; EDGE_COUNT];

/// Compute the case index of a voxel.
///
/// A corner counts as inside when `value >= iso_value`. The comparison is
/// inclusive: a sample exactly at the threshold is inside.
#[inline]
pub fn case_index(voxel: &Voxel, iso_value: IsoValue) -> CaseIndex {
    let mut index: CaseIndex = 0;
    for (corner, vertex) in voxel.vertices.iter().enumerate() {
        if vertex.value >= iso_value {
            index |= 1 << corner;
        }
    }
    index
}

/// Whether a case is skipped during emission.
///
/// True for cases with no crossed edges (all corners inside or all outside)
/// and for the two checkerboard cases whose mask is [`ALL_EDGES`]. The
/// checkerboard cases have triangles in [`TRI_TABLE`], but emit nothing.
#[inline]
pub fn is_trivial_case(case: CaseIndex) -> bool {
    let mask = EDGE_TABLE[case as usize];
    mask == NO_EDGES || mask == ALL_EDGES
}

/// Number of triangles the triangle table lists for a case.
#[inline]
pub fn triangle_count(case: CaseIndex) -> usize {
    TRI_TABLE[case as usize]
        .iter()
        .take_while(|&&e| e != TRIANGLE_SENTINEL)
        .count()
        / 3
}

/// Iterate the edge triples of a case's triangulation.
pub fn case_triangles(case: CaseIndex) -> impl Iterator<Item = [usize; 3]> {
    TRI_TABLE[case as usize]
        .chunks_exact(3)
        .take_while(|tri| tri[0] != TRIANGLE_SENTINEL)
        .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
}

/// Interpolate the iso-crossing between two corners.
///
/// `t = (iso - val1) / (val2 - val1)`, clamped to `[0, 1]`. Equal endpoint
/// values give `t = 0`, i.e. `p1`.
#[inline]
pub fn interpolate_vertex(
    p1: Point3,
    p2: Point3,
    val1: Sample,
    val2: Sample,
    iso_value: IsoValue,
) -> Point3 {
    if val1 == val2 {
        return p1;
    }

    // Widen before subtracting: i16 differences overflow.
    let numer = iso_value as i32 - val1 as i32;
    let denom = val2 as i32 - val1 as i32;
    let t = (numer as f32 / denom as f32).clamp(0.0, 1.0);

    p1.lerp(p2, t)
}

/// Interpolate every edge flagged for `case`.
///
/// Flagged edges receive consecutive indices starting at `*next_index`, in
/// edge order; `next_index` is advanced past the last one.
pub fn intersect_edges(
    voxel: &Voxel,
    case: CaseIndex,
    iso_value: IsoValue,
    next_index: &mut u32,
) -> EdgeIntersections {
    let mut points: EdgeIntersections = [None; EDGE_COUNT];
    let mask = EDGE_TABLE[case as usize];

    for (edge, slot) in points.iter_mut().enumerate() {
        if mask & (1 << edge) == 0 {
            continue;
        }
        let (a, b) = EDGE_VERTICES[edge];
        let va = voxel.vertices[a];
        let vb = voxel.vertices[b];
        *slot = Some(EdgePoint {
            position: interpolate_vertex(va.position, vb.position, va.value, vb.value, iso_value),
            index: *next_index,
        });
        *next_index += 1;
    }

    points
}

/// Append one voxel's geometry to a mesh fragment.
///
/// Every crossed edge is appended as a fresh vertex, then one triangle per
/// triple of the case's triangulation. Returns the number of triangles added.
#[cfg(any(feature = "std", feature = "alloc"))]
pub fn polygonise(voxel: &Voxel, iso_value: IsoValue, mesh: &mut Mesh) -> usize {
    let case = case_index(voxel, iso_value);
    if is_trivial_case(case) {
        return 0;
    }

    let mut next_index = mesh.next_vertex_index();
    let points = intersect_edges(voxel, case, iso_value, &mut next_index);

    for point in points.iter().flatten() {
        mesh.push_vertex(point.position);
    }

    emit_triangles(case, &points, mesh)
}

/// Append the triangles of `case`, referencing the indices in `points`.
#[cfg(any(feature = "std", feature = "alloc"))]
pub fn emit_triangles(case: CaseIndex, points: &EdgeIntersections, mesh: &mut Mesh) -> usize {
    let mut added = 0;
    for [e0, e1, e2] in case_triangles(case) {
        match (points[e0], points[e1], points[e2]) {
            (Some(a), Some(b), Some(c)) => {
                mesh.push_triangle([a.index, b.index, c.index]);
                added += 1;
            }
            _ => debug_assert!(false, "case {:#04x} references an uncrossed edge", case),
        }
    }
    added
}

/// Process a single voxel without dynamic allocation.
///
/// Returns the case's triangles as positions (not indices) in a fixed array
/// sized for the largest case, plus the number of valid entries.
pub fn process_cell_no_alloc(
    voxel: &Voxel,
    iso_value: IsoValue,
) -> ([[Point3; 3]; MAX_TRIANGLES_PER_CASE], usize) {
    let mut triangles = [[Point3::default(); 3]; MAX_TRIANGLES_PER_CASE];

    let case = case_index(voxel, iso_value);
    if is_trivial_case(case) {
        return (triangles, 0);
    }

    let mut scratch = 0;
    let points = intersect_edges(voxel, case, iso_value, &mut scratch);

    let mut count = 0;
    for [e0, e1, e2] in case_triangles(case) {
        if let (Some(a), Some(b), Some(c)) = (points[e0], points[e1], points[e2]) {
            triangles[count] = [a.position, b.position, c.position];
            count += 1;
        }
    }

    (triangles, count)
}
