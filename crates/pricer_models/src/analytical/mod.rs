//! Closed-form Black-Scholes pricing.
//!
//! This module provides:
//! - [`BlackScholes`]: European call/put prices and Greeks
//! - [`Greeks`] and [`AnalyticalValuation`] value objects
//! - [`implied_volatility`]: bounded Newton-Raphson inversion of the price
//!
//! The standard normal functions come from
//! `pricer_core::math::distributions`.

pub mod black_scholes;
pub mod error;
pub mod greeks;
pub mod implied_vol;

pub use black_scholes::BlackScholes;
pub use error::AnalyticalError;
pub use greeks::{AnalyticalValuation, Greeks};
pub use implied_vol::{contract_implied_volatility, implied_volatility, ImpliedVolConfig};
