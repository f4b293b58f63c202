//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts and the closed-form Black-Scholes model.
//!
//! This crate provides:
//! - Contract definitions: [`instruments::OptionContract`] with a tagged
//!   [`instruments::ExerciseStyle`] and [`instruments::OptionType`]
//! - Black-Scholes prices and Greeks ([`analytical::BlackScholes`])
//! - Implied volatility by bounded Newton-Raphson
//!   ([`analytical::implied_volatility`])
//!
//! ## Design Principles
//!
//! - **One contract type**: European and American contracts share
//!   `OptionContract`; engines dispatch on the exercise style
//! - **Validate at construction**: invalid terms never reach a pricer
//! - **Market state is separate**: a contract is priced under any
//!   `pricer_core::market_data::MarketState`
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::MarketState;
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::instruments::{OptionContract, OptionType};
//!
//! let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
//! let call = OptionContract::european(100.0, 1.0, OptionType::Call).unwrap();
//!
//! let price = BlackScholes::from_market(&market).unwrap().price_contract(&call).unwrap();
//! assert!((price - 10.4506).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
