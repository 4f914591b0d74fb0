//! Reconstruction configuration.

use ctsurf_core::{IsoValue, DEFAULT_MAX_WORKERS};

use crate::error::{ReconstructError, Result};

/// Settings for one reconstruction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconstructionConfig {
    /// Density threshold; samples `>= iso_value` are inside the surface.
    pub iso_value: IsoValue,

    /// Number of slice workers. Must be at least 1.
    #[cfg_attr(feature = "serde", serde(default = "default_max_workers"))]
    pub max_workers: usize,
}

#[cfg(feature = "serde")]
fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            iso_value: 0,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl ReconstructionConfig {
    /// Default configuration at the given threshold.
    pub fn new(iso_value: IsoValue) -> Self {
        Self {
            iso_value,
            ..Self::default()
        }
    }

    /// Default configuration at a tissue preset's threshold.
    pub fn from_preset(preset: TissuePreset) -> Self {
        Self::new(preset.iso_value())
    }

    /// Set the density threshold.
    pub fn with_iso_value(mut self, iso_value: IsoValue) -> Self {
        self.iso_value = iso_value;
        self
    }

    /// Set the worker count.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(ReconstructError::InvalidConfig {
                message: "max_workers must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Common CT thresholds in Hounsfield units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TissuePreset {
    /// Cortical and trabecular bone.
    Bone,
    /// Muscle and organ tissue.
    SoftTissue,
    /// Adipose tissue.
    Fat,
}

impl TissuePreset {
    /// All presets, densest first.
    pub const ALL: [TissuePreset; 3] = [Self::Bone, Self::SoftTissue, Self::Fat];

    /// Threshold for this tissue.
    pub const fn iso_value(self) -> IsoValue {
        match self {
            Self::Bone => 200,
            Self::SoftTissue => 40,
            Self::Fat => -120,
        }
    }

    /// Lower-case name, as accepted by [`str::parse`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bone => "bone",
            Self::SoftTissue => "soft-tissue",
            Self::Fat => "fat",
        }
    }
}

impl std::str::FromStr for TissuePreset {
    type Err = ReconstructError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReconstructError::InvalidConfig {
                message: format!("unknown tissue preset '{}'", s),
            })
    }
}
