//! Implied volatility by bounded Newton-Raphson.
//!
//! Iterates `σ ← σ - (price(σ) - target) / vega(σ)` from `initial_guess`,
//! clamping σ to `[lower_bound, upper_bound]` after every step. The search
//! stops once `|price(σ) - target| < tolerance` and fails when vega drops
//! below `min_vega` or `max_iterations` is exhausted; both failures carry
//! the last σ tried.

use pricer_core::market_data::MarketState;
use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use tracing::{debug, warn};

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;
use crate::instruments::{OptionContract, OptionType};

/// Settings for [`implied_volatility`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert_eq!(config.initial_guess, 0.2);
/// assert_eq!(config.tolerance, 1e-6);
/// assert_eq!(config.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolConfig {
    /// Starting σ (default 0.2)
    pub initial_guess: f64,
    /// Price tolerance (default 1e-6)
    pub tolerance: f64,
    /// Iteration budget (default 100)
    pub max_iterations: usize,
    /// Smallest σ the iteration may visit (default 0.001)
    pub lower_bound: f64,
    /// Largest σ the iteration may visit (default 5.0)
    pub upper_bound: f64,
    /// Vega below which the step is refused (default 1e-10)
    pub min_vega: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.2,
            tolerance: 1e-6,
            max_iterations: 100,
            lower_bound: 0.001,
            upper_bound: 5.0,
            min_vega: 1e-10,
        }
    }
}

impl ImpliedVolConfig {
    /// Checks that the settings describe a usable search.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidConfig` if the tolerance is not positive, the
    /// iteration budget is zero, the bracket is empty or not strictly
    /// positive, or `min_vega` is negative.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        let invalid = |message: &str| {
            Err(AnalyticalError::InvalidConfig {
                message: message.to_string(),
            })
        };

        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return invalid("tolerance must be positive");
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations must be > 0");
        }
        if self.lower_bound.is_nan() || self.lower_bound <= 0.0 || !self.upper_bound.is_finite() {
            return invalid("volatility bounds must be positive and finite");
        }
        if self.lower_bound > self.upper_bound {
            return invalid("lower_bound must not exceed upper_bound");
        }
        if !self.initial_guess.is_finite() {
            return invalid("initial_guess must be finite");
        }
        if self.min_vega.is_nan() || self.min_vega < 0.0 {
            return invalid("min_vega must be non-negative");
        }
        Ok(())
    }
}

/// Volatility at which the Black-Scholes price equals `market_price`.
///
/// Convergence is judged on price: the iteration stops once
/// `|price(σ) - market_price| < config.tolerance`. Where vega is tiny (far
/// from the money with short maturity or low volatility) a wide band of σ
/// reprices within tolerance, and the returned σ is only one member of that
/// band.
///
/// # Errors
/// - `AnalyticalError::InvalidSpot` / `InvalidStrike` / `InvalidMaturity` /
///   `InvalidRate` / `InvalidMarketPrice` for rejected inputs
/// - `AnalyticalError::InvalidConfig` if `config` fails validation
/// - `AnalyticalError::ImpliedVolatility` if vega is negligible (always the
///   case at `maturity = 0`) or the iteration does not converge
///
/// # Examples
/// ```
/// use pricer_models::analytical::{implied_volatility, BlackScholes, ImpliedVolConfig};
/// use pricer_models::instruments::OptionType;
///
/// let price = BlackScholes::new(100.0, 0.05, 0.3).unwrap().price(110.0, 0.5, OptionType::Put);
/// let sigma = implied_volatility(
///     price, 100.0, 110.0, 0.05, 0.5, OptionType::Put, &ImpliedVolConfig::default(),
/// ).unwrap();
/// assert!((sigma - 0.3).abs() < 1e-4);
/// ```
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    maturity: f64,
    option_type: OptionType,
    config: &ImpliedVolConfig,
) -> Result<f64, AnalyticalError> {
    if !spot.is_finite() || spot <= 0.0 {
        return Err(AnalyticalError::InvalidSpot { spot });
    }
    if !strike.is_finite() || strike <= 0.0 {
        return Err(AnalyticalError::InvalidStrike { strike });
    }
    if !maturity.is_finite() || maturity < 0.0 {
        return Err(AnalyticalError::InvalidMaturity { maturity });
    }
    if !rate.is_finite() {
        return Err(AnalyticalError::InvalidRate { rate });
    }
    if !market_price.is_finite() {
        return Err(AnalyticalError::InvalidMarketPrice {
            price: market_price,
        });
    }
    config.validate()?;

    let solver = NewtonRaphsonSolver::new(
        SolverConfig::new(config.tolerance, config.max_iterations)
            .with_min_derivative(config.min_vega),
    );

    // The bracket keeps σ > 0, so the unchecked model is always valid
    let model = |sigma: f64| BlackScholes::new_unchecked(spot, rate, sigma);
    let objective = |sigma: f64| model(sigma).price(strike, maturity, option_type) - market_price;
    let vega = |sigma: f64| model(sigma).vega(strike, maturity);

    match solver.find_root_bounded(
        objective,
        vega,
        config.initial_guess,
        config.lower_bound,
        config.upper_bound,
    ) {
        Ok(sigma) => {
            debug!(sigma, market_price, %option_type, "implied volatility converged");
            Ok(sigma)
        }
        Err(err) => {
            warn!(error = %err, market_price, strike, maturity, "implied volatility failed");
            Err(err.into())
        }
    }
}

/// [`implied_volatility`] for a contract under the spot and rate of `market`.
///
/// The market state's own volatility is ignored.
///
/// # Errors
/// As [`implied_volatility`], plus `AnalyticalError::UnsupportedExerciseStyle`
/// for American contracts.
pub fn contract_implied_volatility(
    contract: &OptionContract,
    market: &MarketState,
    market_price: f64,
    config: &ImpliedVolConfig,
) -> Result<f64, AnalyticalError> {
    if !contract.exercise_style().is_european() {
        return Err(AnalyticalError::UnsupportedExerciseStyle {
            style: contract.exercise_style().to_string(),
        });
    }
    implied_volatility(
        market_price,
        market.spot(),
        contract.strike(),
        market.rate(),
        contract.maturity(),
        contract.option_type(),
        config,
    )
}
