//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Expiry
//!
//! At `T = 0` the price is the intrinsic value, Delta is a step function of
//! moneyness and every other Greek is zero.

use num_traits::Float;
use pricer_core::market_data::MarketState;
use pricer_core::math::distributions::{norm_cdf, norm_pdf};

use super::error::AnalyticalError;
use super::greeks::{AnalyticalValuation, Greeks};
use crate::instruments::{OptionContract, OptionType};

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionType;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call = bs.price(100.0, 1.0, OptionType::Call);
/// let put = bs.price(100.0, 1.0, OptionType::Put);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

/// Quantities shared by the price and every Greek at one (K, T).
struct Terms<T> {
    d1: T,
    d2: T,
    sqrt_t: T,
    discount: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidRate` if rate is not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !spot.is_finite() || spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate {
                rate: rate.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !volatility.is_finite() || volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self::new_unchecked(spot, rate, volatility))
    }

    /// Skips validation; callers guarantee `spot > 0` and `volatility > 0`.
    #[inline]
    pub(crate) fn new_unchecked(spot: T, rate: T, volatility: T) -> Self {
        Self {
            spot,
            rate,
            volatility,
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// At `expiry <= 0` this is ±∞ by moneyness (0 at the money).
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return if self.spot > strike {
                T::infinity()
            } else if self.spot < strike {
                T::neg_infinity()
            } else {
                T::zero()
            };
        }

        let half = T::from(0.5).unwrap();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / (self.volatility * expiry.sqrt())
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    fn terms(&self, strike: T, expiry: T) -> Terms<T> {
        let sqrt_t = expiry.sqrt();
        let d1 = self.d1(strike, expiry);
        Terms {
            d1,
            d2: d1 - self.volatility * sqrt_t,
            sqrt_t,
            discount: (-self.rate * expiry).exp(),
        }
    }

    /// European option price.
    ///
    /// Returns the intrinsic value when `expiry <= 0`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// assert!((bs.price(100.0, 1.0, OptionType::Call) - 10.4506).abs() < 1e-4);
    /// assert_eq!(bs.price(90.0, 0.0, OptionType::Call), 10.0);
    /// ```
    #[inline]
    pub fn price(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if expiry <= T::zero() {
            return self.intrinsic(strike, option_type);
        }

        let t = self.terms(strike, expiry);
        let pv_strike = strike * t.discount;

        match option_type {
            OptionType::Call => self.spot * norm_cdf(t.d1) - pv_strike * norm_cdf(t.d2),
            OptionType::Put => pv_strike * norm_cdf(-t.d2) - self.spot * norm_cdf(-t.d1),
        }
    }

    fn intrinsic(&self, strike: T, option_type: OptionType) -> T {
        let value = match option_type {
            OptionType::Call => self.spot - strike,
            OptionType::Put => strike - self.spot,
        };
        value.max(T::zero())
    }

    /// Delta (∂V/∂S): N(d₁) for a call, N(d₁) - 1 for a put.
    ///
    /// At expiry: call 1 if S > K else 0; put -1 if S < K else 0.
    #[inline]
    pub fn delta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        let one = T::one();
        let zero = T::zero();

        if expiry <= zero {
            return match option_type {
                OptionType::Call if self.spot > strike => one,
                OptionType::Put if self.spot < strike => -one,
                _ => zero,
            };
        }

        let n_d1 = norm_cdf(self.d1(strike, expiry));
        match option_type {
            OptionType::Call => n_d1,
            OptionType::Put => n_d1 - one,
        }
    }

    /// Gamma (∂²V/∂S²) = φ(d₁) / (S·σ·√T), identical for calls and puts.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        let t = self.terms(strike, expiry);
        norm_pdf(t.d1) / (self.spot * self.volatility * t.sqrt_t)
    }

    /// Vega (∂V/∂σ) = S·√T·φ(d₁), identical for calls and puts.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        let t = self.terms(strike, expiry);
        self.spot * t.sqrt_t * norm_pdf(t.d1)
    }

    /// Theta (∂V/∂t) per year, usually negative.
    ///
    /// - Call: -(S·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂)
    /// - Put: -(S·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂)
    #[inline]
    pub fn theta(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        let t = self.terms(strike, expiry);
        let two = T::from(2.0).unwrap();

        let decay = -(self.spot * self.volatility * norm_pdf(t.d1)) / (two * t.sqrt_t);
        let carry = self.rate * strike * t.discount;

        match option_type {
            OptionType::Call => decay - carry * norm_cdf(t.d2),
            OptionType::Put => decay + carry * norm_cdf(-t.d2),
        }
    }

    /// Rho (∂V/∂r).
    ///
    /// - Call: K·T·e^(-rT)·N(d₂)
    /// - Put: -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, strike: T, expiry: T, option_type: OptionType) -> T {
        if expiry <= T::zero() {
            return T::zero();
        }
        let t = self.terms(strike, expiry);
        let scale = strike * expiry * t.discount;

        match option_type {
            OptionType::Call => scale * norm_cdf(t.d2),
            OptionType::Put => -scale * norm_cdf(-t.d2),
        }
    }

    /// All five Greeks at once.
    pub fn greeks(&self, strike: T, expiry: T, option_type: OptionType) -> Greeks<T> {
        Greeks {
            delta: self.delta(strike, expiry, option_type),
            gamma: self.gamma(strike, expiry),
            vega: self.vega(strike, expiry),
            theta: self.theta(strike, expiry, option_type),
            rho: self.rho(strike, expiry, option_type),
        }
    }
}

impl BlackScholes<f64> {
    /// Model for the spot, rate and volatility of a market state.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidVolatility` if the market volatility is zero;
    /// the closed form needs σ > 0.
    pub fn from_market(market: &MarketState) -> Result<Self, AnalyticalError> {
        Self::new(market.spot(), market.rate(), market.volatility())
    }

    /// Prices a contract.
    ///
    /// # Errors
    /// - `AnalyticalError::UnsupportedExerciseStyle` for American contracts
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::{OptionContract, OptionType};
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    ///
    /// let put = OptionContract::european(100.0, 1.0, OptionType::Put).unwrap();
    /// assert!((bs.price_contract(&put).unwrap() - 5.5735).abs() < 1e-4);
    ///
    /// let american = OptionContract::american(100.0, 1.0, OptionType::Put).unwrap();
    /// assert!(bs.price_contract(&american).is_err());
    /// ```
    pub fn price_contract(&self, contract: &OptionContract) -> Result<f64, AnalyticalError> {
        Self::ensure_european(contract)?;
        Ok(self.price(
            contract.strike(),
            contract.maturity(),
            contract.option_type(),
        ))
    }

    /// Greeks of a contract.
    ///
    /// # Errors
    /// - `AnalyticalError::UnsupportedExerciseStyle` for American contracts
    pub fn contract_greeks(&self, contract: &OptionContract) -> Result<Greeks, AnalyticalError> {
        Self::ensure_european(contract)?;
        Ok(self.greeks(
            contract.strike(),
            contract.maturity(),
            contract.option_type(),
        ))
    }

    /// Price and Greeks of a contract.
    ///
    /// # Errors
    /// - `AnalyticalError::UnsupportedExerciseStyle` for American contracts
    pub fn valuation(
        &self,
        contract: &OptionContract,
    ) -> Result<AnalyticalValuation, AnalyticalError> {
        Ok(AnalyticalValuation {
            price: self.price_contract(contract)?,
            greeks: self.contract_greeks(contract)?,
        })
    }

    fn ensure_european(contract: &OptionContract) -> Result<(), AnalyticalError> {
        if contract.exercise_style().is_european() {
            Ok(())
        } else {
            Err(AnalyticalError::UnsupportedExerciseStyle {
                style: contract.exercise_style().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn reference_model() -> BlackScholes<f64> {
        BlackScholes::new(100.0, 0.05, 0.2).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = reference_model();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_new_rejects_bad_inputs() {
        assert_eq!(
            BlackScholes::new(-100.0_f64, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { spot: -100.0 })
        );
        assert_eq!(
            BlackScholes::new(100.0_f64, 0.05, 0.0),
            Err(AnalyticalError::InvalidVolatility { volatility: 0.0 })
        );
        assert!(matches!(
            BlackScholes::new(100.0_f64, f64::NAN, 0.2),
            Err(AnalyticalError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_new_negative_rate_allowed() {
        assert!(BlackScholes::new(100.0_f64, -0.01, 0.2).is_ok());
    }

    #[test]
    fn test_from_market_rejects_zero_volatility() {
        let market = MarketState::new(100.0, 0.05, 0.0).unwrap();
        assert!(matches!(
            BlackScholes::from_market(&market),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    // ==========================================================
    // d1 / d2
    // ==========================================================

    #[test]
    fn test_d1_d2_atm() {
        let bs = reference_model();
        // d1 = (0 + 0.07) / 0.2 = 0.35, d2 = 0.15
        assert_relative_eq!(bs.d1(100.0, 1.0), 0.35, epsilon = 1e-12);
        assert_relative_eq!(bs.d2(100.0, 1.0), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_at_expiry() {
        let bs = reference_model();
        assert_eq!(bs.d1(90.0, 0.0), f64::INFINITY);
        assert_eq!(bs.d1(110.0, 0.0), f64::NEG_INFINITY);
        assert_eq!(bs.d1(100.0, 0.0), 0.0);
    }

    // ==========================================================
    // Prices
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        let bs = reference_model();
        assert_relative_eq!(
            bs.price(100.0, 1.0, OptionType::Call),
            10.450_583_572_185_567,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_put_price_reference_value() {
        let bs = reference_model();
        assert_relative_eq!(
            bs.price(100.0, 1.0, OptionType::Put),
            5.573_526_022_256_968,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_price_at_expiry_is_intrinsic() {
        let bs = reference_model();
        assert_eq!(bs.price(90.0, 0.0, OptionType::Call), 10.0);
        assert_eq!(bs.price(110.0, 0.0, OptionType::Call), 0.0);
        assert_eq!(bs.price(110.0, 0.0, OptionType::Put), 10.0);
        assert_eq!(bs.price(90.0, 0.0, OptionType::Put), 0.0);
    }

    #[test]
    fn test_deep_itm_call_approaches_forward() {
        let bs = reference_model();
        let price = bs.price(10.0, 1.0, OptionType::Call);
        let forward = 100.0 - 10.0 * (-0.05_f64).exp();
        assert_relative_eq!(price, forward, epsilon = 1e-10);
    }

    #[test]
    fn test_deep_otm_call_near_zero() {
        let bs = reference_model();
        assert!(bs.price(400.0, 0.25, OptionType::Call) < 1e-12);
    }

    #[test]
    fn test_put_call_parity_negative_rate() {
        let bs = BlackScholes::new(100.0_f64, -0.02, 0.3).unwrap();
        let lhs = bs.price(105.0, 2.0, OptionType::Call) - bs.price(105.0, 2.0, OptionType::Put);
        let rhs = 100.0 - 105.0 * (0.04_f64).exp();
        assert_relative_eq!(lhs, rhs, epsilon = 1e-10);
    }

    // ==========================================================
    // Greeks
    // ==========================================================

    #[test]
    fn test_greeks_reference_values() {
        let bs = reference_model();
        let call = bs.greeks(100.0, 1.0, OptionType::Call);
        assert_relative_eq!(call.delta, 0.636_830_651_175_619, epsilon = 1e-12);
        assert_relative_eq!(call.gamma, 0.018_762_017_345_846_894, epsilon = 1e-12);
        assert_relative_eq!(call.vega, 37.524_034_691_693_79, epsilon = 1e-10);
        assert_relative_eq!(call.theta, -6.414_027_546_438_196, epsilon = 1e-10);
        assert_relative_eq!(call.rho, 53.232_481_545_376_34, epsilon = 1e-10);

        let put = bs.greeks(100.0, 1.0, OptionType::Put);
        assert_relative_eq!(put.delta, 0.636_830_651_175_619 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(put.gamma, call.gamma, epsilon = 1e-15);
        assert_relative_eq!(put.vega, call.vega, epsilon = 1e-12);
        assert_relative_eq!(put.theta, -1.657_880_423_934_626, epsilon = 1e-10);
        assert_relative_eq!(put.rho, -41.890_460_904_695_06, epsilon = 1e-10);
    }

    #[test]
    fn test_greeks_at_expiry() {
        let bs = reference_model();

        let itm_call = bs.greeks(90.0, 0.0, OptionType::Call);
        assert_eq!(itm_call.delta, 1.0);
        assert_eq!(itm_call.gamma, 0.0);
        assert_eq!(itm_call.vega, 0.0);
        assert_eq!(itm_call.theta, 0.0);
        assert_eq!(itm_call.rho, 0.0);

        assert_eq!(bs.delta(110.0, 0.0, OptionType::Call), 0.0);
        assert_eq!(bs.delta(110.0, 0.0, OptionType::Put), -1.0);
        assert_eq!(bs.delta(90.0, 0.0, OptionType::Put), 0.0);
        assert_eq!(bs.delta(100.0, 0.0, OptionType::Put), 0.0);
    }

    #[test]
    fn test_delta_vs_finite_diff() {
        let h = 0.01;
        let up = BlackScholes::new(100.0 + h, 0.05, 0.2).unwrap();
        let down = BlackScholes::new(100.0 - h, 0.05, 0.2).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            let fd = (up.price(105.0, 0.75, option_type) - down.price(105.0, 0.75, option_type))
                / (2.0 * h);
            assert_relative_eq!(
                reference_model().delta(105.0, 0.75, option_type),
                fd,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_gamma_vs_finite_diff() {
        let h = 0.01;
        let bs = reference_model();
        let up = BlackScholes::new(100.0 + h, 0.05, 0.2).unwrap();
        let down = BlackScholes::new(100.0 - h, 0.05, 0.2).unwrap();
        let fd = (up.price(95.0, 0.5, OptionType::Call)
            - 2.0 * bs.price(95.0, 0.5, OptionType::Call)
            + down.price(95.0, 0.5, OptionType::Call))
            / (h * h);
        assert_relative_eq!(bs.gamma(95.0, 0.5), fd, epsilon = 1e-4);
    }

    #[test]
    fn test_vega_vs_finite_diff() {
        let h = 1e-5;
        let up = BlackScholes::new(100.0, 0.05, 0.2 + h).unwrap();
        let down = BlackScholes::new(100.0, 0.05, 0.2 - h).unwrap();
        let fd = (up.price(110.0, 1.5, OptionType::Put) - down.price(110.0, 1.5, OptionType::Put))
            / (2.0 * h);
        assert_relative_eq!(reference_model().vega(110.0, 1.5), fd, epsilon = 1e-5);
    }

    #[test]
    fn test_theta_vs_finite_diff() {
        // ∂V/∂t = -∂V/∂T
        let h = 1e-5;
        let bs = reference_model();
        for option_type in [OptionType::Call, OptionType::Put] {
            let up = bs.price(100.0, 1.0 + h, option_type);
            let down = bs.price(100.0, 1.0 - h, option_type);
            let fd = -(up - down) / (2.0 * h);
            assert_relative_eq!(bs.theta(100.0, 1.0, option_type), fd, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_rho_vs_finite_diff() {
        let h = 1e-6;
        let up = BlackScholes::new(100.0, 0.05 + h, 0.2).unwrap();
        let down = BlackScholes::new(100.0, 0.05 - h, 0.2).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            let fd = (up.price(100.0, 1.0, option_type) - down.price(100.0, 1.0, option_type))
                / (2.0 * h);
            assert_relative_eq!(reference_model().rho(100.0, 1.0, option_type), fd, epsilon = 1e-4);
        }
    }

    // ==========================================================
    // Contracts
    // ==========================================================

    #[test]
    fn test_price_contract_european() {
        let bs = reference_model();
        let call = OptionContract::european(100.0, 1.0, OptionType::Call).unwrap();
        assert_relative_eq!(
            bs.price_contract(&call).unwrap(),
            bs.price(100.0, 1.0, OptionType::Call),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_price_contract_american_rejected() {
        let bs = reference_model();
        let put = OptionContract::american(100.0, 1.0, OptionType::Put).unwrap();
        assert_eq!(
            bs.price_contract(&put),
            Err(AnalyticalError::UnsupportedExerciseStyle {
                style: "american".to_string()
            })
        );
        assert!(bs.valuation(&put).is_err());
    }

    #[test]
    fn test_valuation_bundles_price_and_greeks() {
        let bs = reference_model();
        let put = OptionContract::european(95.0, 0.5, OptionType::Put).unwrap();
        let v = bs.valuation(&put).unwrap();
        assert_eq!(v.price, bs.price(95.0, 0.5, OptionType::Put));
        assert_eq!(v.greeks, bs.greeks(95.0, 0.5, OptionType::Put));
    }

    #[test]
    fn test_f32_compatibility() {
        let bs = BlackScholes::new(100.0_f32, 0.05, 0.2).unwrap();
        let price = bs.price(100.0, 1.0, OptionType::Call);
        assert!((price - 10.4506).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_put_call_parity(
            spot in 1.0_f64..500.0,
            strike in 1.0_f64..500.0,
            rate in -0.05_f64..0.15,
            expiry in 0.01_f64..5.0,
            vol in 0.01_f64..1.5,
        ) {
            let bs = BlackScholes::new(spot, rate, vol).unwrap();
            let lhs = bs.price(strike, expiry, OptionType::Call)
                - bs.price(strike, expiry, OptionType::Put);
            let rhs = spot - strike * (-rate * expiry).exp();
            prop_assert!((lhs - rhs).abs() < 1e-8, "parity gap {}", lhs - rhs);
        }

        #[test]
        fn prop_price_above_intrinsic_forward(
            spot in 1.0_f64..500.0,
            strike in 1.0_f64..500.0,
            expiry in 0.01_f64..5.0,
            vol in 0.01_f64..1.5,
        ) {
            let bs = BlackScholes::new(spot, 0.03, vol).unwrap();
            let call = bs.price(strike, expiry, OptionType::Call);
            let lower = (spot - strike * (-0.03 * expiry).exp()).max(0.0);
            prop_assert!(call >= lower - 1e-9);
            prop_assert!(call <= spot + 1e-9);
        }
    }
}
