//! In-memory CT volume.

use ctsurf_core::{check_dimensions, Sample, Spacing, VolumetricImage};

use crate::error::{ReconstructError, Result};

/// Dense volume of samples stored x-fastest: the sample at `(i, j, k)` lives
/// at `i + nx * (j + ny * k)`.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeGrid {
    dims: (usize, usize, usize),
    spacing: Spacing,
    samples: Vec<Sample>,
}

impl VolumeGrid {
    /// Wrap an existing sample buffer.
    ///
    /// # Errors
    /// Fails when any dimension is below 2, or when `samples.len()` is not
    /// `nx * ny * nz`.
    pub fn new(dims: (usize, usize, usize), spacing: Spacing, samples: Vec<Sample>) -> Result<Self> {
        check_dimensions(dims)?;
        let expected = sample_count(dims)?;
        if samples.len() != expected {
            return Err(ReconstructError::DataLengthMismatch {
                expected,
                got: samples.len(),
            });
        }
        Ok(Self {
            dims,
            spacing,
            samples,
        })
    }

    /// Build a volume by evaluating `f(i, j, k)` at every sample.
    pub fn from_fn<F>(dims: (usize, usize, usize), spacing: Spacing, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> Sample,
    {
        check_dimensions(dims)?;
        let mut samples = Vec::with_capacity(sample_count(dims)?);
        let (nx, ny, nz) = dims;
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    samples.push(f(i, j, k));
                }
            }
        }
        Ok(Self {
            dims,
            spacing,
            samples,
        })
    }

    /// Volume with every sample set to `value`.
    pub fn filled(dims: (usize, usize, usize), spacing: Spacing, value: Sample) -> Result<Self> {
        check_dimensions(dims)?;
        let samples = vec![value; sample_count(dims)?];
        Ok(Self {
            dims,
            spacing,
            samples,
        })
    }

    /// Raw samples in storage order.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Mutable sample access, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, i: usize, j: usize, k: usize) -> Option<&mut Sample> {
        let (nx, ny, nz) = self.dims;
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        self.samples.get_mut(i + nx * (j + ny * k))
    }

    /// Replace the voxel spacing.
    pub fn set_spacing(&mut self, spacing: Spacing) {
        self.spacing = spacing;
    }

    /// Smallest and largest sample.
    pub fn value_range(&self) -> (Sample, Sample) {
        self.samples
            .iter()
            .fold((Sample::MAX, Sample::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    #[inline]
    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        let (nx, ny, _) = self.dims;
        i + nx * (j + ny * k)
    }
}

impl VolumetricImage for VolumeGrid {
    #[inline]
    fn dimensions(&self) -> (usize, usize, usize) {
        self.dims
    }

    #[inline]
    fn spacing(&self) -> Spacing {
        self.spacing
    }

    #[inline]
    fn sample(&self, i: usize, j: usize, k: usize) -> Sample {
        self.samples[self.index(i, j, k)]
    }
}

fn sample_count((nx, ny, nz): (usize, usize, usize)) -> Result<usize> {
    nx.checked_mul(ny)
        .and_then(|n| n.checked_mul(nz))
        .ok_or_else(|| ReconstructError::InvalidVolume {
            message: format!("{}x{}x{} samples overflow usize", nx, ny, nz),
        })
}
