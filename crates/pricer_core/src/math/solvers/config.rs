//! Solver configuration types.

use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.max_iterations, 100);
///
/// // Implied-volatility style settings
/// let iv = SolverConfig::new(1e-6, 100).with_min_derivative(1e-10);
/// assert_eq!(iv.min_derivative, 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance: the solver stops when `|f(x)| < tolerance`.
    pub tolerance: T,

    /// Maximum number of iterations before giving up with
    /// `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,

    /// Smallest accepted `|f'(x)|`. Below this the Newton step is refused
    /// with `SolverError::DerivativeNearZero`.
    pub min_derivative: T,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    /// - `min_derivative`: 1e-30
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
            min_derivative: T::from(1e-30).unwrap(),
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with the default derivative guard.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Replace the derivative guard.
    ///
    /// # Panics
    ///
    /// Panics if `min_derivative` is negative.
    pub fn with_min_derivative(mut self, min_derivative: T) -> Self {
        assert!(
            min_derivative >= T::zero(),
            "min_derivative must be non-negative"
        );
        self.min_derivative = min_derivative;
        self
    }
}
