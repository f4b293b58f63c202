//! Monte Carlo pricing result.

use pricer_core::math::statistics::SampleStats;
use serde::{Deserialize, Serialize};

/// z-score of the two-sided 95% normal interval.
pub const Z_95: f64 = 1.96;

/// Price estimate with its statistical error.
///
/// The interval is the Monte Carlo estimator's 95% confidence interval,
/// `price ± 1.96 × standard_error`; it describes sampling noise, not a
/// correctness bound.
///
/// # Examples
///
/// ```rust
/// use pricer_core::math::statistics::SampleStats;
/// use pricer_pricing::mc::PricingResult;
///
/// let payoffs: SampleStats = [4.0, 6.0, 5.0, 5.0].into_iter().collect();
/// let result = PricingResult::from_sample(&payoffs, 0.9);
///
/// assert!((result.price - 4.5).abs() < 1e-12);
/// assert_eq!(result.sample_count, 4);
/// assert!(result.confidence_lower <= result.price);
/// assert!(result.price <= result.confidence_upper);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Present value estimate.
    pub price: f64,
    /// Standard error of the price estimate.
    pub standard_error: f64,
    /// Lower end of the 95% confidence interval.
    pub confidence_lower: f64,
    /// Upper end of the 95% confidence interval.
    pub confidence_upper: f64,
    /// Number of paths averaged.
    pub sample_count: u64,
}

impl PricingResult {
    /// Result from undiscounted sample statistics and a discount factor.
    ///
    /// `price = discount × mean` and
    /// `standard_error = discount × sqrt(variance / n)` with the unbiased
    /// variance; a single-sample estimate reports zero error.
    pub fn from_sample(stats: &SampleStats, discount: f64) -> Self {
        let price = discount * stats.mean();
        let standard_error = discount * stats.std_error();
        let half_width = Z_95 * standard_error;

        Self {
            price,
            standard_error,
            confidence_lower: price - half_width,
            confidence_upper: price + half_width,
            sample_count: stats.count(),
        }
    }

    /// Half-width of the 95% confidence interval.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        Z_95 * self.standard_error
    }

    /// Returns whether `value` lies inside the 95% interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.confidence_lower <= value && value <= self.confidence_upper
    }
}
