//! Monte Carlo pricing engine.
//!
//! [`MonteCarloEngine`] coordinates:
//! 1. Worker partitioning (via [`split_paths`](super::workers::split_paths))
//! 2. Per-worker random streams (via [`PricerRng::for_worker`])
//! 3. Path generation (via [`PathSimulator`])
//! 4. Payoff aggregation and discounting, or the Longstaff-Schwartz solver
//!    for American contracts
//!
//! The engine holds configuration only. Every call builds fresh RNG streams
//! from the configured seed, so pricing takes `&self` and repeated calls
//! return identical results.

use pricer_core::market_data::MarketState;
use pricer_core::math::statistics::SampleStats;
use pricer_models::instruments::{ExerciseStyle, OptionContract};
use rayon::prelude::*;
use tracing::{debug, debug_span};

use super::config::SimulationConfig;
use super::paths::{PathMatrix, PathSimulator};
use super::result::PricingResult;
use super::workers::{merge_in_order, split_paths};
use crate::lsm::{AmericanExerciseSolver, ExerciseStep, LsmConfig};
use crate::rng::PricerRng;

/// Monte Carlo pricing engine for European and American vanilla options.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketState;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_pricing::mc::{MonteCarloEngine, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .n_paths(20_000)
///     .n_steps(1)
///     .seed(42)
///     .build()
///     .unwrap();
/// let engine = MonteCarloEngine::new(config);
///
/// let call = OptionContract::european(100.0, 1.0, OptionType::Call).unwrap();
/// let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
///
/// let result = engine.price(&call, &market);
/// assert!((result.price - 10.4506).abs() < 4.0 * result.standard_error);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloEngine {
    config: SimulationConfig,
    solver: AmericanExerciseSolver,
}

impl MonteCarloEngine {
    /// Creates an engine with the default Longstaff-Schwartz policy.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            solver: AmericanExerciseSolver::default(),
        }
    }

    /// Replaces the Longstaff-Schwartz policy.
    pub fn with_lsm_config(mut self, lsm: LsmConfig) -> Self {
        self.solver = AmericanExerciseSolver::new(lsm);
        self
    }

    /// Returns the simulation configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the Longstaff-Schwartz policy.
    #[inline]
    pub fn lsm_config(&self) -> &LsmConfig {
        self.solver.config()
    }

    /// Prices `contract`, dispatching on its exercise style.
    pub fn price(&self, contract: &OptionContract, market: &MarketState) -> PricingResult {
        match contract.exercise_style() {
            ExerciseStyle::European => self.price_european(contract, market),
            ExerciseStyle::American => self.price_american(contract, market),
        }
    }

    /// Prices the European payoff of `contract`, ignoring its exercise style.
    ///
    /// Each worker simulates its block of paths into a reusable buffer and
    /// accumulates terminal payoffs; partial statistics are merged in worker
    /// order and discounted by `e^{-rT}`.
    pub fn price_european(&self, contract: &OptionContract, market: &MarketState) -> PricingResult {
        let config = &self.config;
        let _span = debug_span!(
            "european_mc",
            paths = config.n_paths(),
            steps = config.n_steps(),
            workers = config.num_workers(),
            seed = config.seed()
        )
        .entered();
        debug!(
            strike = contract.strike(),
            maturity = contract.maturity(),
            option_type = %contract.option_type(),
            "starting european simulation"
        );

        let simulator = PathSimulator::for_contract(contract, market, config);
        let n_steps = simulator.n_steps();
        let seed = config.seed();

        let partials: Vec<SampleStats> = split_paths(config.n_paths(), config.num_workers())
            .into_par_iter()
            .enumerate()
            .map(|(worker, block)| {
                let mut rng = PricerRng::for_worker(seed, worker as u64);
                let mut path = vec![0.0; simulator.path_len()];
                let mut stats = SampleStats::new();
                for _ in block {
                    simulator.simulate_into(&mut path, &mut rng);
                    stats.push(contract.payoff(path[n_steps]));
                }
                stats
            })
            .collect();

        let discount = market.discount_factor(contract.maturity());
        let result = PricingResult::from_sample(&merge_in_order(&partials), discount);

        debug!(
            price = result.price,
            standard_error = result.standard_error,
            "european simulation finished"
        );
        result
    }

    /// Prices `contract` with early exercise at every simulation step.
    ///
    /// Unlike the European engine this stores every path: peak memory is
    /// `8 * n_paths * (n_steps + 1)` bytes for the matrix plus one cash flow
    /// per path. [`SimulationConfig`] caps the matrix at
    /// [`MAX_PATH_MATRIX_LEN`](super::MAX_PATH_MATRIX_LEN) values.
    pub fn price_american(&self, contract: &OptionContract, market: &MarketState) -> PricingResult {
        self.price_american_with_diagnostics(contract, market).0
    }

    /// As [`price_american`](Self::price_american), also returning the
    /// per-step exercise diagnostics.
    pub fn price_american_with_diagnostics(
        &self,
        contract: &OptionContract,
        market: &MarketState,
    ) -> (PricingResult, Vec<ExerciseStep>) {
        let config = &self.config;
        let _span = debug_span!(
            "american_mc",
            paths = config.n_paths(),
            steps = config.n_steps(),
            workers = config.num_workers(),
            seed = config.seed()
        )
        .entered();
        debug!(
            strike = contract.strike(),
            maturity = contract.maturity(),
            option_type = %contract.option_type(),
            min_itm_paths = self.solver.config().min_itm_paths,
            "starting american simulation"
        );

        let simulator = PathSimulator::for_contract(contract, market, config);
        let paths = PathMatrix::simulate(&simulator, config);
        let (result, steps) = self
            .solver
            .solve_with_diagnostics(&paths, contract, market.rate());

        debug!(
            price = result.price,
            standard_error = result.standard_error,
            exercise_dates = steps.len(),
            "american simulation finished"
        );
        (result, steps)
    }
}
