//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Umbrella category every layer error converts into
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Categorised pricing errors.
///
/// Lower-layer errors (market data, instrument, configuration, analytical)
/// convert into one of these categories so that callers dispatching across
/// engines only need to handle a single type.
///
/// # Variants
/// - `InvalidInput`: Invalid market data, contract terms or configuration
/// - `NumericalInstability`: Computation failed to converge
/// - `UnsupportedInstrument`: Instrument not supported by the chosen engine
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Rejected before any computation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An iterative method diverged or stalled.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// The chosen engine cannot price this contract.
    #[error("Unsupported instrument: {0}")]
    UnsupportedInstrument(String),
}

/// Root-finding solver errors.
///
/// Carries the last iterate and the iteration at which the solver gave up,
/// so callers can report how far the search got.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100, last_x: 0.35 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations (last x = {last_x})")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// Last iterate before giving up
        last_x: f64,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x} (iteration {iteration})")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
        /// Zero-based iteration index
        iteration: usize,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        PricingError::NumericalInstability(err.to_string())
    }
}
