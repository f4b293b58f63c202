//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to analytical pricing models

use pricer_core::types::{PricingError, SolverError};
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`, `InvalidSpot`, `InvalidRate`, `InvalidStrike`,
///   `InvalidMaturity`, `InvalidMarketPrice`: rejected inputs
/// - `InvalidConfig`: unusable implied-volatility settings
/// - `UnsupportedExerciseStyle`: no closed form for the contract
/// - `ImpliedVolatility`: the implied-volatility iteration failed
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive or not finite).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive or not finite).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Risk-free rate is not finite.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Invalid strike (non-positive or not finite).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid maturity (negative or not finite).
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Observed option price is not finite.
    #[error("Invalid market price: {price}")]
    InvalidMarketPrice {
        /// The invalid price
        price: f64,
    },

    /// Implied-volatility settings cannot be used.
    #[error("Invalid implied volatility config: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// Unsupported exercise style.
    #[error("Unsupported exercise style: {style}")]
    UnsupportedExerciseStyle {
        /// Description of the unsupported exercise style
        style: String,
    },

    /// Implied-volatility iteration failed.
    #[error("Implied volatility failed: {0}")]
    ImpliedVolatility(#[from] SolverError),
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::UnsupportedExerciseStyle { .. } => {
                PricingError::UnsupportedInstrument(err.to_string())
            }
            AnalyticalError::ImpliedVolatility(_) => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_unsupported_style_display() {
        let err = AnalyticalError::UnsupportedExerciseStyle {
            style: "american".to_string(),
        };
        assert_eq!(format!("{}", err), "Unsupported exercise style: american");
    }

    #[test]
    fn test_from_solver_error() {
        let err: AnalyticalError = SolverError::MaxIterationsExceeded {
            iterations: 100,
            last_x: 5.0,
        }
        .into();
        assert!(format!("{}", err).contains("100 iterations"));
    }

    #[test]
    fn test_into_pricing_error_categories() {
        let err: PricingError = AnalyticalError::InvalidSpot { spot: 0.0 }.into();
        assert!(matches!(err, PricingError::InvalidInput(_)));

        let err: PricingError = AnalyticalError::UnsupportedExerciseStyle {
            style: "american".to_string(),
        }
        .into();
        assert!(matches!(err, PricingError::UnsupportedInstrument(_)));

        let err: PricingError = AnalyticalError::ImpliedVolatility(SolverError::DerivativeNearZero {
            x: 0.2,
            iteration: 0,
        })
        .into();
        assert!(matches!(err, PricingError::NumericalInstability(_)));
    }
}
