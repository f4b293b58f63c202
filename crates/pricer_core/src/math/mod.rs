//! Numerical building blocks used by the pricing layers.
//!
//! - [`distributions`]: standard normal CDF and PDF
//! - [`solvers`]: Newton-Raphson root finding
//! - [`regression`]: least-squares polynomial fitting via Cholesky
//! - [`statistics`]: mergeable running mean and variance

pub mod distributions;
pub mod regression;
pub mod solvers;
pub mod statistics;
