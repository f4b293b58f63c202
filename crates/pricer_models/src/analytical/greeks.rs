//! Sensitivity value objects.

/// First- and second-order sensitivities of one option.
///
/// All values are in natural per-year units: `theta` is `∂V/∂t` per year of
/// calendar time and `vega`/`rho` are per unit (not per percentage point)
/// change in σ and r. Rescaling to per-day or per-1% is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T = f64> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂σ
    pub vega: T,
    /// ∂V/∂t
    pub theta: T,
    /// ∂V/∂r
    pub rho: T,
}

/// Closed-form price bundled with its Greeks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyticalValuation {
    /// Option price
    pub price: f64,
    /// Sensitivities at the same inputs
    pub greeks: Greeks,
}
