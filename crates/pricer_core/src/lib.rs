//! # pricer_core: Numerical Foundation for the Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 3-layer architecture, providing:
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//! - Standard normal distribution functions (`math::distributions`)
//! - Newton-Raphson root finding with bounds (`math::solvers`)
//! - Least-squares polynomial regression (`math::regression`)
//! - Mergeable sample statistics (`math::statistics`)
//! - Per-call market inputs: `MarketState` (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketState;
//! use pricer_core::math::distributions::norm_cdf;
//!
//! let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
//! assert_eq!(market.spot(), 100.0);
//!
//! let p = norm_cdf(0.0_f64);
//! assert!((p - 0.5).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `MarketState` and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
