//! Error types for ctsurf.
//!
//! Only configuration and integration-boundary problems are reported here;
//! once a reconstruction has started it always runs to completion.

use ctsurf_core::CoreError;
use thiserror::Error;

/// Errors that can occur when setting up or validating a reconstruction.
#[derive(Error, Debug)]
pub enum ReconstructError {
    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// The volume cannot be reconstructed.
    #[error("invalid volume: {message}")]
    InvalidVolume {
        /// Description of the volume error.
        message: String,
    },

    /// Sample buffer does not match the volume dimensions.
    #[error("sample buffer has {got} values, dimensions require {expected}")]
    DataLengthMismatch {
        /// Number of samples implied by the dimensions.
        expected: usize,
        /// Number of samples supplied.
        got: usize,
    },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Kernel boundary check failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for ctsurf operations.
pub type Result<T> = std::result::Result<T, ReconstructError>;
