//! Monte Carlo simulation of GBM paths and vanilla option pricing.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloEngine
//! ├── SimulationConfig       (paths, steps, seed, workers)
//! ├── split_paths()          (contiguous path blocks, one per worker)
//! ├── PricerRng::for_worker  (independent stream per worker)
//! ├── PathSimulator          (GBM recurrence, shared read-only)
//! ├── European: terminal payoff → SampleStats per worker → ordered merge
//! └── American: PathMatrix → AmericanExerciseSolver
//! ```
//!
//! # Reproducibility
//!
//! A run is a pure function of `(contract, market, config)`. Changing
//! `num_workers` changes which stream generates which path, and therefore
//! the estimate; changing the rayon thread pool size does not.
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketState;
//! use pricer_models::instruments::{OptionContract, OptionType};
//! use pricer_pricing::mc::{MonteCarloEngine, SimulationConfig};
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(50)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let engine = MonteCarloEngine::new(config);
//!
//! let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
//! let put = OptionContract::american(100.0, 1.0, OptionType::Put).unwrap();
//!
//! let result = engine.price(&put, &market);
//! println!(
//!     "Price: {:.4} [{:.4}, {:.4}]",
//!     result.price, result.confidence_lower, result.confidence_upper
//! );
//! ```

pub mod config;
pub mod error;
pub mod paths;
pub mod pricer;
pub mod result;
pub mod workers;

pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_NUM_WORKERS, DEFAULT_SEED, MAX_PATHS,
    MAX_PATH_MATRIX_LEN, MAX_STEPS,
};
pub use error::ConfigError;
pub use paths::{GbmParams, PathMatrix, PathSimulator};
pub use pricer::MonteCarloEngine;
pub use result::PricingResult;
pub use workers::split_paths;
