//! Option contract definitions.
//!
//! - [`OptionContract`]: strike, maturity, option type and exercise style
//! - [`OptionType`]: call or put, owns the payoff rule
//! - [`ExerciseStyle`]: European or American
//! - [`InstrumentError`]: validation failures
//!
//! # Examples
//! ```
//! use pricer_models::instruments::{ExerciseStyle, OptionContract, OptionType};
//!
//! let put_type = "put".parse().unwrap();
//! let put = OptionContract::new(100.0, 1.0, put_type, ExerciseStyle::American).unwrap();
//! assert_eq!(put.option_type(), OptionType::Put);
//! assert_eq!(put.payoff(90.0), 10.0);
//! ```

mod error;
mod exercise;
mod option;
mod payoff;

pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use option::OptionContract;
pub use payoff::OptionType;
