//! Explicit choice between the closed-form and simulation engines.

use pricer_core::market_data::MarketState;
use pricer_core::types::PricingError;
use pricer_models::analytical::{AnalyticalValuation, BlackScholes};
use pricer_models::instruments::OptionContract;
use serde::{Deserialize, Serialize};

use crate::lsm::LsmConfig;
use crate::mc::{MonteCarloEngine, PricingResult, SimulationConfig};

/// How a contract is priced.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketState;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_pricing::strategy::{PricingStrategy, Valuation};
///
/// let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
/// let call = OptionContract::european(100.0, 1.0, OptionType::Call).unwrap();
///
/// let valuation = PricingStrategy::Analytical.price(&call, &market).unwrap();
/// assert!((valuation.price() - 10.4506).abs() < 1e-4);
/// assert!(matches!(valuation, Valuation::Analytical(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategy {
    /// Closed-form Black-Scholes; European contracts only.
    Analytical,
    /// Monte Carlo, with Longstaff-Schwartz for American contracts.
    MonteCarlo {
        /// Paths, steps, seed and workers.
        simulation: SimulationConfig,
        /// Early-exercise policy; defaults when omitted.
        #[serde(default)]
        lsm: LsmConfig,
    },
}

/// Outcome of [`PricingStrategy::price`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Valuation {
    /// Price and Greeks from the closed form.
    Analytical(AnalyticalValuation),
    /// Estimate with statistical error from simulation.
    Simulated(PricingResult),
}

impl Valuation {
    /// Price regardless of the engine that produced it.
    pub fn price(&self) -> f64 {
        match self {
            Valuation::Analytical(v) => v.price,
            Valuation::Simulated(r) => r.price,
        }
    }
}

impl PricingStrategy {
    /// Monte Carlo with the default Longstaff-Schwartz policy.
    pub fn monte_carlo(simulation: SimulationConfig) -> Self {
        PricingStrategy::MonteCarlo {
            simulation,
            lsm: LsmConfig::default(),
        }
    }

    /// Prices `contract` under `market`.
    ///
    /// # Errors
    ///
    /// Analytical pricing fails with `PricingError::UnsupportedInstrument`
    /// for American contracts and `PricingError::InvalidInput` when the
    /// market volatility is zero. Simulation never fails.
    pub fn price(
        &self,
        contract: &OptionContract,
        market: &MarketState,
    ) -> Result<Valuation, PricingError> {
        match self {
            PricingStrategy::Analytical => {
                let model = BlackScholes::from_market(market)?;
                Ok(Valuation::Analytical(model.valuation(contract)?))
            }
            PricingStrategy::MonteCarlo { simulation, lsm } => {
                let engine = MonteCarloEngine::new(simulation.clone()).with_lsm_config(*lsm);
                Ok(Valuation::Simulated(engine.price(contract, market)))
            }
        }
    }
}
