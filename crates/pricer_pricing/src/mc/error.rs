//! Error types for the simulation engines.

use pricer_core::types::PricingError;
use thiserror::Error;

use super::config::{MAX_PATHS, MAX_PATH_MATRIX_LEN, MAX_STEPS};

/// Configuration error for the Monte Carlo engines.
///
/// Raised at construction time; a built [`SimulationConfig`](super::SimulationConfig)
/// never produces one while pricing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Path count outside `[1, MAX_PATHS]`.
    #[error("Invalid path count {0}: must be in range [1, {max}]", max = MAX_PATHS)]
    InvalidPathCount(usize),

    /// Step count outside `[1, MAX_STEPS]`.
    #[error("Invalid step count {0}: must be in range [1, {max}]", max = MAX_STEPS)]
    InvalidStepCount(usize),

    /// Full path matrix would hold more than `MAX_PATH_MATRIX_LEN` values.
    #[error(
        "Path matrix too large: {n_paths} paths x {n_steps} steps exceeds {max} values",
        max = MAX_PATH_MATRIX_LEN
    )]
    PathMatrixTooLarge {
        /// Requested path count.
        n_paths: usize,
        /// Requested step count.
        n_steps: usize,
    },

    /// Worker count of zero.
    #[error("Invalid worker count {0}: must be at least 1")]
    InvalidWorkerCount(usize),

    /// Invalid or missing parameter.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the problem.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
