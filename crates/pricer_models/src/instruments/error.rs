//! Instrument error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Contract validation errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Strike is not strictly positive and finite.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Maturity is negative or not finite.
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Unrecognised option type tag.
    #[error("Unknown option type: '{tag}'")]
    UnknownOptionType {
        /// The tag that failed to parse
        tag: String,
    },

    /// Unrecognised exercise style tag.
    #[error("Unknown exercise style: '{tag}'")]
    UnknownExerciseStyle {
        /// The tag that failed to parse
        tag: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_strike_display() {
        let err = InstrumentError::InvalidStrike { strike: -100.0 };
        assert_eq!(format!("{}", err), "Invalid strike: K = -100");
    }

    #[test]
    fn test_invalid_maturity_display() {
        let err = InstrumentError::InvalidMaturity { maturity: -0.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: T = -0.5");
    }

    #[test]
    fn test_unknown_tag_display() {
        let err = InstrumentError::UnknownOptionType {
            tag: "straddle".to_string(),
        };
        assert_eq!(format!("{}", err), "Unknown option type: 'straddle'");
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = InstrumentError::UnknownExerciseStyle {
            tag: "asian".to_string(),
        }
        .into();
        match err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("asian")),
            _ => panic!("Expected InvalidInput variant"),
        }
    }
}
