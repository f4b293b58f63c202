//! Spot, rate and volatility for one pricing call.

use super::{MarketDataError, VolatilityEstimator};

/// Market state for a single pricing call.
///
/// Not owned by any contract: the same contract can be priced under many
/// market states.
///
/// # Invariants
///
/// - `spot > 0` and finite
/// - `rate` finite (may be negative)
/// - `volatility >= 0` and finite
///
/// # Example
///
/// ```
/// use pricer_core::market_data::MarketState;
///
/// let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
/// assert_eq!(market.rate(), 0.05);
///
/// assert!(MarketState::new(0.0, 0.05, 0.2).is_err());
/// assert!(MarketState::new(100.0, 0.05, -0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MarketQuote"))]
pub struct MarketState {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl MarketState {
    /// Create a validated market state.
    ///
    /// # Errors
    ///
    /// - `MarketDataError::InvalidSpot` if `spot <= 0` or not finite
    /// - `MarketDataError::InvalidRate` if `rate` is not finite
    /// - `MarketDataError::InvalidVolatility` if `volatility < 0` or not finite
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, MarketDataError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(MarketDataError::InvalidSpot { spot });
        }
        if !rate.is_finite() {
            return Err(MarketDataError::InvalidRate { rate });
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(MarketDataError::InvalidVolatility { volatility });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Create a market state whose volatility comes from an external estimator.
    pub fn from_estimator(
        spot: f64,
        rate: f64,
        estimator: &dyn VolatilityEstimator,
    ) -> Result<Self, MarketDataError> {
        Self::new(spot, rate, estimator.annualised_volatility())
    }

    /// Same spot and rate with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, MarketDataError> {
        Self::new(self.spot, self.rate, volatility)
    }

    /// Spot price of the underlying.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Continuously compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// `e^{-r t}`
    #[inline]
    pub fn discount_factor(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }
}

/// Unvalidated wire form, checked through [`MarketState::new`] on deserialisation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MarketQuote {
    spot: f64,
    rate: f64,
    volatility: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<MarketQuote> for MarketState {
    type Error = MarketDataError;

    fn try_from(quote: MarketQuote) -> Result<Self, Self::Error> {
        Self::new(quote.spot, quote.rate, quote.volatility)
    }
}
