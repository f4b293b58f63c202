//! Longstaff-Schwartz least-squares Monte Carlo for American options.
//!
//! Backward induction over a [`PathMatrix`](crate::mc::PathMatrix):
//!
//! 1. Cash flow of each path starts as the payoff at maturity.
//! 2. For `t = n_steps - 1` down to `1`, cash flows are discounted one step
//!    and, when more than `min_itm_paths` paths are in the money, a
//!    quadratic in moneyness `S/K` is fitted to the in-the-money cash flows.
//!    Paths whose exercise value beats the fitted continuation value are
//!    exercised and their cash flow replaced.
//! 3. The price is one more step of discounting applied to the mean cash
//!    flow; the standard error uses the same estimator as the European engine.
//!
//! A step whose sample is too small, or whose normal matrix is not positive
//! definite, is skipped: all paths are simply discounted.

mod solver;

pub use solver::{AmericanExerciseSolver, ExerciseStep, LsmConfig, DEFAULT_MIN_ITM_PATHS};
