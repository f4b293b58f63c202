//! Backward induction with per-step regression.

use pricer_core::math::regression::QuadraticRegression;
use pricer_core::math::statistics::SampleStats;
use pricer_models::instruments::OptionContract;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::mc::workers::merge_in_order;
use crate::mc::{PathMatrix, PricingResult};

/// Default minimum number of in-the-money paths for a regression.
pub const DEFAULT_MIN_ITM_PATHS: usize = 10;

/// Longstaff-Schwartz policy settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LsmConfig {
    /// A step regresses only when strictly more paths than this are in the money.
    pub min_itm_paths: usize,
}

impl Default for LsmConfig {
    fn default() -> Self {
        Self {
            min_itm_paths: DEFAULT_MIN_ITM_PATHS,
        }
    }
}

/// What happened at one exercise date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseStep {
    /// Time index, `1..n_steps`.
    pub step: usize,
    /// Paths with positive exercise value.
    pub itm_paths: usize,
    /// Paths exercised at this step.
    pub exercised_paths: usize,
    /// Whether a regression was fitted; `false` means pure discounting.
    pub regression_used: bool,
}

/// Longstaff-Schwartz American exercise solver.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketState;
/// use pricer_models::instruments::{OptionContract, OptionType};
/// use pricer_pricing::lsm::{AmericanExerciseSolver, LsmConfig};
/// use pricer_pricing::mc::{PathMatrix, PathSimulator, SimulationConfig};
///
/// let put = OptionContract::american(100.0, 1.0, OptionType::Put).unwrap();
/// let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
/// let config = SimulationConfig::builder().n_paths(2_000).n_steps(10).build().unwrap();
///
/// let sim = PathSimulator::for_contract(&put, &market, &config);
/// let paths = PathMatrix::simulate(&sim, &config);
///
/// let solver = AmericanExerciseSolver::new(LsmConfig::default());
/// let (result, steps) = solver.solve_with_diagnostics(&paths, &put, market.rate());
///
/// assert!(result.price > 0.0);
/// assert_eq!(steps.len(), 9);
/// assert_eq!(steps[0].step, 9);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AmericanExerciseSolver {
    config: LsmConfig,
}

impl AmericanExerciseSolver {
    /// Creates a solver with the given policy.
    pub fn new(config: LsmConfig) -> Self {
        Self { config }
    }

    /// Returns the policy.
    pub fn config(&self) -> &LsmConfig {
        &self.config
    }

    /// Prices `contract` on `paths` with early exercise at every interior
    /// time index.
    ///
    /// The exercise style of `contract` is not consulted. The time step is
    /// `contract.maturity() / paths.n_steps()`.
    pub fn solve(&self, paths: &PathMatrix, contract: &OptionContract, rate: f64) -> PricingResult {
        self.solve_with_diagnostics(paths, contract, rate).0
    }

    /// As [`solve`](Self::solve), also returning one [`ExerciseStep`] per
    /// interior time index, latest first.
    pub fn solve_with_diagnostics(
        &self,
        paths: &PathMatrix,
        contract: &OptionContract,
        rate: f64,
    ) -> (PricingResult, Vec<ExerciseStep>) {
        let n_steps = paths.n_steps();
        let strike = contract.strike();
        let dt = contract.maturity() / n_steps as f64;
        let discount = (-rate * dt).exp();
        let blocks = paths.blocks();

        let _span = debug_span!(
            "longstaff_schwartz",
            paths = paths.n_paths(),
            steps = n_steps,
            blocks = blocks.len()
        )
        .entered();

        // Cash flows are owned per block; block order fixes every merge below
        let mut cash_flows: Vec<Vec<f64>> = blocks
            .par_iter()
            .map(|block| {
                block
                    .clone()
                    .map(|i| contract.payoff(paths.spot(i, n_steps)))
                    .collect()
            })
            .collect();

        let mut steps = Vec::with_capacity(n_steps.saturating_sub(1));

        for step in (1..n_steps).rev() {
            let partials: Vec<QuadraticRegression> = cash_flows
                .par_iter_mut()
                .zip(blocks.par_iter())
                .map(|(flows, block)| {
                    let mut regression = QuadraticRegression::new();
                    for (flow, i) in flows.iter_mut().zip(block.clone()) {
                        *flow *= discount;
                        let spot = paths.spot(i, step);
                        if contract.is_in_the_money(spot) {
                            regression.observe(spot / strike, *flow);
                        }
                    }
                    regression
                })
                .collect();

            let regression = partials
                .iter()
                .fold(QuadraticRegression::new(), |mut acc, part| {
                    acc.merge(part);
                    acc
                });
            let itm_paths = regression.count();

            let fit = if itm_paths > self.config.min_itm_paths {
                let fit = regression.solve();
                if fit.is_none() {
                    debug!(
                        step,
                        itm_paths, "normal matrix not positive definite, regression skipped"
                    );
                }
                fit
            } else {
                debug!(
                    step,
                    itm_paths,
                    min_itm_paths = self.config.min_itm_paths,
                    "too few in-the-money paths, regression skipped"
                );
                None
            };

            let exercised_paths = match fit {
                Some(fit) => cash_flows
                    .par_iter_mut()
                    .zip(blocks.par_iter())
                    .map(|(flows, block)| {
                        let mut exercised = 0usize;
                        for (flow, i) in flows.iter_mut().zip(block.clone()) {
                            let spot = paths.spot(i, step);
                            let exercise = contract.payoff(spot);
                            if exercise > 0.0 && exercise > fit.evaluate(spot / strike) {
                                *flow = exercise;
                                exercised += 1;
                            }
                        }
                        exercised
                    })
                    .sum(),
                None => 0,
            };

            trace!(step, itm_paths, exercised_paths, "exercise step");
            steps.push(ExerciseStep {
                step,
                itm_paths,
                exercised_paths,
                regression_used: fit.is_some(),
            });
        }

        let partials: Vec<SampleStats> = cash_flows
            .par_iter()
            .map(|flows| flows.iter().copied().collect())
            .collect();
        let result = PricingResult::from_sample(&merge_in_order(&partials), discount);

        debug!(
            price = result.price,
            standard_error = result.standard_error,
            "longstaff-schwartz finished"
        );
        (result, steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::OptionType;

    fn put(strike: f64, maturity: f64) -> OptionContract {
        OptionContract::american(strike, maturity, OptionType::Put).unwrap()
    }

    #[test]
    fn test_default_config() {
        assert_eq!(LsmConfig::default().min_itm_paths, 10);
        assert_eq!(AmericanExerciseSolver::default().config().min_itm_paths, 10);
    }

    #[test]
    fn test_single_step_is_discounted_terminal_payoff() {
        let paths = PathMatrix::from_paths(vec![
            vec![100.0, 90.0],
            vec![100.0, 105.0],
            vec![100.0, 80.0],
        ])
        .unwrap();
        let solver = AmericanExerciseSolver::default();
        let (result, steps) = solver.solve_with_diagnostics(&paths, &put(100.0, 1.0), 0.05);

        assert!(steps.is_empty());
        let df = (-0.05_f64).exp();
        assert_relative_eq!(result.price, df * 10.0, epsilon = 1e-12);
        assert_eq!(result.sample_count, 3);
    }

    #[test]
    fn test_too_few_itm_paths_means_pure_discounting() {
        // Two steps, three paths: at most 3 ITM, below the default threshold
        let paths = PathMatrix::from_paths(vec![
            vec![100.0, 50.0, 95.0],
            vec![100.0, 60.0, 90.0],
            vec![100.0, 120.0, 130.0],
        ])
        .unwrap();
        let solver = AmericanExerciseSolver::default();
        let (result, steps) = solver.solve_with_diagnostics(&paths, &put(100.0, 2.0), 0.0);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].itm_paths, 2);
        assert!(!steps[0].regression_used);
        assert_eq!(steps[0].exercised_paths, 0);
        // Zero rate: mean of terminal payoffs (5, 10, 0)
        assert_relative_eq!(result.price, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_is_strict() {
        // Exactly min_itm_paths ITM paths: no regression
        let mut rows = vec![vec![100.0, 90.0, 95.0]; 3];
        rows.push(vec![100.0, 110.0, 95.0]);
        let paths = PathMatrix::from_paths(rows).unwrap();

        let solver = AmericanExerciseSolver::new(LsmConfig { min_itm_paths: 3 });
        let (_, steps) = solver.solve_with_diagnostics(&paths, &put(100.0, 1.0), 0.0);
        assert_eq!(steps[0].itm_paths, 3);
        assert!(!steps[0].regression_used);
    }

    #[test]
    fn test_singular_regression_means_pure_discounting() {
        // Every ITM path sits at the same spot at step 1
        let rows: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![100.0, 80.0, 70.0 + i as f64])
            .collect();
        let paths = PathMatrix::from_paths(rows).unwrap();

        let solver = AmericanExerciseSolver::new(LsmConfig { min_itm_paths: 2 });
        let (result, steps) = solver.solve_with_diagnostics(&paths, &put(100.0, 1.0), 0.0);

        assert_eq!(steps[0].itm_paths, 20);
        assert!(!steps[0].regression_used);
        // Terminal payoffs 30 down to 11, mean 20.5
        assert_relative_eq!(result.price, 20.5, epsilon = 1e-12);
    }

    #[test]
    fn test_deep_itm_paths_exercise_early() {
        // Half the paths collapse at step 1 and recover by maturity; the
        // fitted continuation is far below the immediate payoff for them.
        let mut rows = Vec::new();
        for i in 0..40 {
            let low = 20.0 + i as f64 * 0.5;
            rows.push(vec![100.0, low, 110.0]);
            rows.push(vec![100.0, 90.0 + i as f64 * 0.2, 99.0]);
        }
        let paths = PathMatrix::from_paths(rows).unwrap();

        let solver = AmericanExerciseSolver::default();
        let (result, steps) = solver.solve_with_diagnostics(&paths, &put(100.0, 1.0), 0.0);

        assert!(steps[0].regression_used);
        assert!(steps[0].exercised_paths >= 40);

        let european = (0..80).map(|i| if i % 2 == 0 { 0.0 } else { 1.0 }).sum::<f64>() / 80.0;
        assert!(result.price > european + 10.0);
    }

    #[test]
    fn test_calls_use_call_payoff() {
        let call = OptionContract::american(100.0, 1.0, OptionType::Call).unwrap();
        let paths =
            PathMatrix::from_paths(vec![vec![100.0, 120.0], vec![100.0, 90.0]]).unwrap();
        let result = AmericanExerciseSolver::default().solve(&paths, &call, 0.0);
        assert_relative_eq!(result.price, 10.0, epsilon = 1e-12);
    }
}
