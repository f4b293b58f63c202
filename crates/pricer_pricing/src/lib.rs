//! # Pricer Pricing (Layer 3: Simulation Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns L2 contracts into prices by simulation:
//! - Seeded, per-worker random streams ([`rng::PricerRng`])
//! - Geometric Brownian motion paths ([`mc::PathSimulator`])
//! - European Monte Carlo pricing with a 95% confidence interval
//!   ([`mc::MonteCarloEngine`])
//! - Longstaff-Schwartz early exercise for American contracts
//!   ([`lsm::AmericanExerciseSolver`])
//! - A single entry point choosing between closed form and simulation
//!   ([`strategy::PricingStrategy`])
//!
//! ## Determinism
//!
//! Every engine call is a pure function of the contract, the market state
//! and the [`mc::SimulationConfig`]. Workers own contiguous path blocks and
//! their partial results are merged in block order, so the rayon pool size
//! never changes the result.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::MarketState;
//! use pricer_models::instruments::{OptionContract, OptionType};
//! use pricer_pricing::{MonteCarloEngine, PricingStrategy, SimulationConfig};
//!
//! let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
//! let put = OptionContract::european(100.0, 1.0, OptionType::Put).unwrap();
//!
//! let analytical = PricingStrategy::Analytical.price(&put, &market).unwrap();
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(20_000)
//!     .n_steps(1)
//!     .build()
//!     .unwrap();
//! let simulated = MonteCarloEngine::new(config).price(&put, &market);
//!
//! assert!((simulated.price - analytical.price()).abs() < 4.0 * simulated.standard_error);
//! ```
//!
//! ## Configuration
//!
//! Engine defaults can be loaded from TOML and `PRICER_*` environment
//! variables through [`settings::EngineSettings`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod lsm;
pub mod mc;
pub mod rng;
pub mod settings;
pub mod strategy;

pub use lsm::{AmericanExerciseSolver, ExerciseStep, LsmConfig};
pub use mc::{ConfigError, MonteCarloEngine, PathSimulator, PricingResult, SimulationConfig};
pub use rng::PricerRng;
pub use settings::{EngineSettings, SettingsError};
pub use strategy::{PricingStrategy, Valuation};
