//! Synthetic CT phantom.
//!
//! A torso-like cross-section extruded along z: air outside, a fat layer
//! around soft tissue, two lungs, and a bony spine plus ribs ring. Values are
//! Hounsfield units, so the [`ctsurf::TissuePreset`] thresholds pick out
//! recognisable surfaces.

use ctsurf::{Result, Sample, Spacing, VolumeGrid};

/// Tissue classes used by the phantom, with their sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhantomRegion {
    /// Outside the body.
    Air,
    /// Air-filled lung tissue.
    Lung,
    /// Subcutaneous fat.
    Fat,
    /// Muscle and organs.
    SoftTissue,
    /// Spine and ribs.
    Bone,
}

impl PhantomRegion {
    /// Hounsfield value of the region.
    pub const fn value(self) -> Sample {
        match self {
            Self::Air => -1000,
            Self::Lung => -800,
            Self::Fat => -100,
            Self::SoftTissue => 50,
            Self::Bone => 700,
        }
    }

    /// Region at normalized position `(x, y, z)`, each in `[-1, 1]`.
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        let ellipse = |cx: f32, cy: f32, rx: f32, ry: f32| {
            let dx = (x - cx) / rx;
            let dy = (y - cy) / ry;
            dx * dx + dy * dy
        };

        // Body tapers towards both ends of the scan.
        let taper = 1.0 - 0.25 * z * z;
        let body = ellipse(0.0, 0.0, 0.9 * taper, 0.65 * taper);
        if body > 1.0 {
            return Self::Air;
        }
        if body > 0.8 {
            return Self::Fat;
        }

        let spine = ellipse(0.0, 0.4, 0.12, 0.12);
        let ribs = ellipse(0.0, 0.0, 0.78 * taper, 0.55 * taper);
        if spine < 1.0 || (ribs > 0.9 && ribs < 1.0 && y > -0.3) {
            return Self::Bone;
        }

        let lung_l = ellipse(-0.38, -0.05, 0.25, 0.35);
        let lung_r = ellipse(0.38, -0.05, 0.25, 0.35);
        if (lung_l < 1.0 || lung_r < 1.0) && z.abs() < 0.7 {
            return Self::Lung;
        }

        Self::SoftTissue
    }
}

/// Sample the phantom on a `dims` grid with the given spacing.
pub fn ct_phantom(dims: (usize, usize, usize), spacing: Spacing) -> Result<VolumeGrid> {
    let norm = |i: usize, n: usize| {
        if n > 1 {
            2.0 * i as f32 / (n - 1) as f32 - 1.0
        } else {
            0.0
        }
    };
    let (nx, ny, nz) = dims;
    VolumeGrid::from_fn(dims, spacing, |i, j, k| {
        PhantomRegion::at(norm(i, nx), norm(j, ny), norm(k, nz)).value()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctsurf::VolumetricImage;

    #[test]
    fn test_regions() {
        assert_eq!(PhantomRegion::at(1.0, 1.0, 0.0), PhantomRegion::Air);
        assert_eq!(PhantomRegion::at(0.0, 0.4, 0.0), PhantomRegion::Bone);
        assert_eq!(PhantomRegion::at(-0.38, -0.05, 0.0), PhantomRegion::Lung);
        assert_eq!(PhantomRegion::at(0.0, -0.3, 0.0), PhantomRegion::SoftTissue);
    }

    #[test]
    fn test_phantom_contains_all_tissues() {
        let volume = ct_phantom((48, 40, 12), [0.8, 0.8, 2.5]).unwrap();
        assert_eq!(volume.dimensions(), (48, 40, 12));
        let (lo, hi) = volume.value_range();
        assert_eq!(lo, PhantomRegion::Air.value());
        assert_eq!(hi, PhantomRegion::Bone.value());
        assert!(volume.samples().contains(&PhantomRegion::Fat.value()));
    }

    #[test]
    fn test_phantom_rejects_flat_volume() {
        assert!(ct_phantom((16, 16, 1), [1.0; 3]).is_err());
    }
}
