//! Path generation for Monte Carlo simulation.
//!
//! Geometric Brownian Motion paths use the log-space (exact) step
//! ```text
//! S(t+dt) = S(t) × exp((r - σ²/2)dt + σ√dt × Z)
//! ```
//! with one standard normal `Z` per step drawn from the caller's stream.
//!
//! # Memory Layout
//!
//! [`PathMatrix`] stores paths in row-major order:
//! `data[path_idx * (n_steps + 1) + step_idx]`, where `step_idx = 0` holds
//! the initial spot.

use std::ops::Range;

use pricer_core::market_data::MarketState;
use pricer_models::instruments::OptionContract;
use rayon::prelude::*;

use super::config::{SimulationConfig, MAX_STEPS};
use super::error::ConfigError;
use super::workers::split_paths;
use crate::rng::PricerRng;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// ```text
/// dS = r S dt + σ S dW
/// ```
///
/// under the risk-neutral measure.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams {
///     spot: 100.0,
///     rate: 0.05,
///     volatility: 0.2,
///     maturity: 1.0,
/// };
/// assert!(params.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time horizon (T) in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }

    /// Parameters for simulating `market` out to `maturity`.
    #[inline]
    pub fn from_market(market: &MarketState, maturity: f64) -> Self {
        Self::new(market.spot(), market.rate(), market.volatility(), maturity)
    }

    /// Returns `true` if spot is positive, volatility and maturity are
    /// non-negative and everything is finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.spot > 0.0
            && self.spot.is_finite()
            && self.rate.is_finite()
            && self.volatility >= 0.0
            && self.volatility.is_finite()
            && self.maturity >= 0.0
            && self.maturity.is_finite()
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.05,
            volatility: 0.2,
            maturity: 1.0,
        }
    }
}

/// Generates discretised GBM paths.
///
/// Drift and diffusion per step are precomputed once; the simulator holds no
/// mutable state, so one instance can be shared by all workers of a run.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{GbmParams, PathSimulator};
/// use pricer_pricing::rng::PricerRng;
///
/// let sim = PathSimulator::new(GbmParams::default(), 12).unwrap();
/// let mut rng = PricerRng::from_seed(42);
///
/// let path = sim.simulate(&mut rng);
/// assert_eq!(path.len(), 13);
/// assert_eq!(path[0], 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSimulator {
    spot: f64,
    n_steps: usize,
    dt: f64,
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl PathSimulator {
    /// Creates a simulator with `n_steps` equal steps of `maturity / n_steps`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidStepCount` if `n_steps` is 0 or above `MAX_STEPS`
    /// - `ConfigError::InvalidParameter` if `params` fails [`GbmParams::is_valid`]
    pub fn new(params: GbmParams, n_steps: usize) -> Result<Self, ConfigError> {
        if n_steps == 0 || n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(n_steps));
        }
        if !params.is_valid() {
            return Err(ConfigError::InvalidParameter {
                name: "gbm",
                value: format!("{:?}", params),
            });
        }

        Ok(Self::from_parts(params, n_steps))
    }

    /// Simulator for `contract` under `market`, stepping as `config` says.
    ///
    /// Infallible: every input has already been validated at construction.
    pub fn for_contract(
        contract: &OptionContract,
        market: &MarketState,
        config: &SimulationConfig,
    ) -> Self {
        Self::from_parts(
            GbmParams::from_market(market, contract.maturity()),
            config.n_steps(),
        )
    }

    fn from_parts(params: GbmParams, n_steps: usize) -> Self {
        let dt = params.maturity / n_steps as f64;
        let drift_dt = (params.rate - 0.5 * params.volatility * params.volatility) * dt;
        let vol_sqrt_dt = params.volatility * dt.sqrt();

        Self {
            spot: params.spot,
            n_steps,
            dt,
            drift_dt,
            vol_sqrt_dt,
        }
    }

    /// Number of time steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of spot values in one path (`n_steps + 1`).
    #[inline]
    pub fn path_len(&self) -> usize {
        self.n_steps + 1
    }

    /// Length of one time step in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Fills `path` with one trajectory, drawing `n_steps` normals from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `path.len() != n_steps + 1`.
    #[inline]
    pub fn simulate_into(&self, path: &mut [f64], rng: &mut PricerRng) {
        assert_eq!(
            path.len(),
            self.path_len(),
            "path buffer must hold n_steps + 1 values"
        );

        path[0] = self.spot;
        for step in 0..self.n_steps {
            let z = rng.gen_normal();
            let increment = self.drift_dt + self.vol_sqrt_dt * z;
            path[step + 1] = path[step] * increment.exp();
        }
    }

    /// Allocates and returns one trajectory.
    pub fn simulate(&self, rng: &mut PricerRng) -> Vec<f64> {
        let mut path = vec![0.0; self.path_len()];
        self.simulate_into(&mut path, rng);
        path
    }
}

/// Read-only ensemble of full paths, stored row-major.
///
/// Also records the worker blocks the rows were generated in; consumers
/// that reduce over the matrix in parallel use the same blocks so their
/// merges happen in a fixed order.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    n_paths: usize,
    n_steps: usize,
    data: Vec<f64>,
    blocks: Vec<Range<usize>>,
}

impl PathMatrix {
    /// Simulates `config.n_paths()` paths in parallel.
    ///
    /// Worker `i` fills its block of rows sequentially from
    /// `PricerRng::for_worker(config.seed(), i)`, so row contents depend
    /// only on `(seed, n_paths, num_workers)`. The simulator's step count is
    /// used; `config.n_steps()` is not consulted.
    pub fn simulate(simulator: &PathSimulator, config: &SimulationConfig) -> Self {
        let n_paths = config.n_paths();
        let stride = simulator.path_len();
        let blocks = split_paths(n_paths, config.num_workers());
        let mut data = vec![0.0; n_paths * stride];

        let mut rows: Vec<&mut [f64]> = Vec::with_capacity(blocks.len());
        let mut rest = data.as_mut_slice();
        for block in &blocks {
            let (head, tail) = rest.split_at_mut(block.len() * stride);
            rows.push(head);
            rest = tail;
        }

        let seed = config.seed();
        rows.into_par_iter()
            .enumerate()
            .for_each(|(worker, chunk)| {
                let mut rng = PricerRng::for_worker(seed, worker as u64);
                for path in chunk.chunks_exact_mut(stride) {
                    simulator.simulate_into(path, &mut rng);
                }
            });

        Self {
            n_paths,
            n_steps: simulator.n_steps(),
            data,
            blocks,
        }
    }

    /// Builds a matrix from explicit paths, treated as a single block.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidPathCount` if `paths` is empty
    /// - `ConfigError::InvalidStepCount` if paths have fewer than two points
    /// - `ConfigError::InvalidParameter` if paths differ in length
    pub fn from_paths(paths: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        let n_paths = paths.len();
        let first_len = paths
            .first()
            .map(Vec::len)
            .ok_or(ConfigError::InvalidPathCount(0))?;
        if first_len < 2 {
            return Err(ConfigError::InvalidStepCount(first_len.saturating_sub(1)));
        }
        if paths.iter().any(|p| p.len() != first_len) {
            return Err(ConfigError::InvalidParameter {
                name: "paths",
                value: "all paths must have the same length".to_string(),
            });
        }

        Ok(Self {
            n_paths,
            n_steps: first_len - 1,
            data: paths.into_iter().flatten().collect(),
            blocks: vec![0..n_paths],
        })
    }

    /// Number of paths (rows).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps (each row holds `n_steps + 1` spots).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Full trajectory of one path.
    #[inline]
    pub fn path(&self, path_idx: usize) -> &[f64] {
        let stride = self.n_steps + 1;
        &self.data[path_idx * stride..(path_idx + 1) * stride]
    }

    /// Spot of path `path_idx` at time index `step`.
    #[inline]
    pub fn spot(&self, path_idx: usize, step: usize) -> f64 {
        self.data[path_idx * (self.n_steps + 1) + step]
    }

    /// Contiguous row blocks, in worker order.
    #[inline]
    pub fn blocks(&self) -> &[Range<usize>] {
        &self.blocks
    }
}
