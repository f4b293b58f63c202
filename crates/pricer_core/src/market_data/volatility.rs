//! Boundary for external volatility sources.

use super::MarketDataError;

/// A source of annualised volatility.
///
/// Forecasting models (historical, EWMA, fitted) live outside this
/// workspace. The pricer only consumes the scalar they produce, through
/// [`MarketState::from_estimator`](super::MarketState::from_estimator),
/// which checks that it is non-negative.
pub trait VolatilityEstimator {
    /// Annualised volatility, e.g. `0.2` for 20%.
    fn annualised_volatility(&self) -> f64;
}

/// Estimator returning a fixed volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct ConstantVolatility {
    sigma: f64,
}

impl ConstantVolatility {
    /// # Errors
    ///
    /// `MarketDataError::InvalidVolatility` if `sigma` is negative or not finite.
    pub fn new(sigma: f64) -> Result<Self, MarketDataError> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(MarketDataError::InvalidVolatility { volatility: sigma });
        }
        Ok(Self { sigma })
    }
}

impl TryFrom<f64> for ConstantVolatility {
    type Error = MarketDataError;

    fn try_from(sigma: f64) -> Result<Self, Self::Error> {
        Self::new(sigma)
    }
}

impl From<ConstantVolatility> for f64 {
    fn from(v: ConstantVolatility) -> Self {
        v.sigma
    }
}

impl VolatilityEstimator for ConstantVolatility {
    fn annualised_volatility(&self) -> f64 {
        self.sigma
    }
}
