//! Core error types shared by every layer.
//!
//! # Re-exports
//!
//! [`PricingError`] and [`SolverError`] are re-exported from `error`.

pub mod error;

pub use error::{PricingError, SolverError};
