//! Error types for ctsurf_core operations.
//!
//! Provides a simple error enum with no external dependencies for no_std compatibility.
//! The per-cell kernel itself never fails; these errors are raised by the
//! boundary checks around it.

use core::fmt;

/// Error types that can occur at the boundaries of the reconstruction kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// A volume axis has fewer than two samples, so no cell can be formed.
    InvalidDimensions {
        /// The axis (0 = x, 1 = y, 2 = z).
        axis: u8,
        /// The offending sample count.
        dim: usize,
    },
    /// A triangle references a vertex that does not exist.
    TriangleIndexOutOfBounds {
        /// Position of the triangle in the mesh.
        triangle: usize,
        /// The offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// The worker bound must be at least one.
    ZeroWorkers,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidDimensions { axis, dim } => {
                write!(f, "axis {} has {} samples, at least 2 are required", axis, dim)
            }
            CoreError::TriangleIndexOutOfBounds {
                triangle,
                index,
                vertex_count,
            } => {
                write!(
                    f,
                    "triangle {} references vertex {} but mesh has {} vertices",
                    triangle, index, vertex_count
                )
            }
            CoreError::ZeroWorkers => write!(f, "worker count must be at least 1"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

/// Check that every axis can hold at least one cell.
pub fn check_dimensions(dims: (usize, usize, usize)) -> Result<(), CoreError> {
    for (axis, dim) in [dims.0, dims.1, dims.2].into_iter().enumerate() {
        if dim < 2 {
            return Err(CoreError::InvalidDimensions {
                axis: axis as u8,
                dim,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_error_display() {
        use std::format;

        let err = CoreError::InvalidDimensions { axis: 2, dim: 1 };
        assert_eq!(
            format!("{}", err),
            "axis 2 has 1 samples, at least 2 are required"
        );

        let err = CoreError::TriangleIndexOutOfBounds {
            triangle: 4,
            index: 9,
            vertex_count: 9,
        };
        assert_eq!(
            format!("{}", err),
            "triangle 4 references vertex 9 but mesh has 9 vertices"
        );

        assert_eq!(
            format!("{}", CoreError::ZeroWorkers),
            "worker count must be at least 1"
        );
    }

    #[test]
    fn test_check_dimensions() {
        assert_eq!(check_dimensions((2, 2, 2)), Ok(()));
        assert_eq!(
            check_dimensions((4, 1, 4)),
            Err(CoreError::InvalidDimensions { axis: 1, dim: 1 })
        );
        assert_eq!(
            check_dimensions((0, 3, 3)),
            Err(CoreError::InvalidDimensions { axis: 0, dim: 0 })
        );
    }
}
