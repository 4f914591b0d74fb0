//! Core types for ctsurf_core.
//!
//! Provides the physical-space point type, integer grid coordinates and the
//! scalar/threshold aliases used throughout the reconstruction kernel.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// Scalar sample type of a CT volume (Hounsfield units fit in 16 bits).
pub type Sample = i16;

/// Threshold defining the extracted surface. Fixed for one reconstruction run.
pub type IsoValue = i16;

/// Per-axis physical spacing of the grid, `[sx, sy, sz]`.
pub type Spacing = [f32; 3];

/// Spacing magnitude below which an axis is considered degenerate.
pub const SPACING_EPSILON: f32 = 1e-7;

/// A 3D point with named fields for clarity.
///
/// Provides arithmetic operations and conversions to/from arrays.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a Point3 with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation between two points.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Component-wise product.
    #[inline]
    pub fn mul_components(self, other: Self) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Dot product with another point (treating both as vectors).
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another point (treating both as vectors).
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Length (magnitude) of the vector.
    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.dot(self))
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: libm::fminf(self.x, other.x),
            y: libm::fminf(self.y, other.y),
            z: libm::fminf(self.z, other.z),
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: libm::fmaxf(self.x, other.x),
            y: libm::fmaxf(self.y, other.y),
            z: libm::fmaxf(self.z, other.z),
        }
    }
}

impl From<[f32; 3]> for Point3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Point3> for [f32; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        p.as_array()
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Div<f32> for Point3 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl Neg for Point3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Integer grid coordinates `(i, j, k)` of a sample or cell origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCoord {
    /// Column index (x axis).
    pub i: usize,
    /// Row index (y axis).
    pub j: usize,
    /// Slice index (z axis).
    pub k: usize,
}

impl GridCoord {
    /// Create a new GridCoord.
    #[inline]
    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    /// Coordinate of a voxel corner, given its offset from this cell origin.
    #[inline]
    pub const fn offset(self, (di, dj, dk): (usize, usize, usize)) -> Self {
        Self {
            i: self.i + di,
            j: self.j + dj,
            k: self.k + dk,
        }
    }

    /// Physical position of this grid point for the given spacing.
    #[inline]
    pub fn to_position(self, spacing: Spacing) -> Point3 {
        Point3::new(
            self.i as f32 * spacing[0],
            self.j as f32 * spacing[1],
            self.k as f32 * spacing[2],
        )
    }
}

impl From<(usize, usize, usize)> for GridCoord {
    #[inline]
    fn from((i, j, k): (usize, usize, usize)) -> Self {
        Self { i, j, k }
    }
}

/// Replace degenerate axis spacings with `1.0`.
///
/// Any axis whose magnitude is below [`SPACING_EPSILON`] is reset; the others
/// are kept as-is (including negative spacings).
#[inline]
pub fn normalize_spacing(spacing: Spacing) -> Spacing {
    spacing.map(|s| if libm::fabsf(s) < SPACING_EPSILON { 1.0 } else { s })
}
