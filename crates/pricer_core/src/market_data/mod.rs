//! Market inputs for a single pricing call.
//!
//! # Components
//!
//! - [`MarketState`]: validated spot, rate and volatility
//! - [`VolatilityEstimator`]: boundary trait for external volatility sources
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{ConstantVolatility, MarketState};
//!
//! let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
//! assert!((market.discount_factor(1.0) - 0.951229).abs() < 1e-6);
//!
//! let est = ConstantVolatility::new(0.25).unwrap();
//! let market = MarketState::from_estimator(100.0, 0.05, &est).unwrap();
//! assert_eq!(market.volatility(), 0.25);
//! ```

pub mod error;
mod state;
mod volatility;

pub use error::MarketDataError;
pub use state::MarketState;
pub use volatility::{ConstantVolatility, VolatilityEstimator};
