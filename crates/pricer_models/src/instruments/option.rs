//! Vanilla option contract.

use super::{ExerciseStyle, InstrumentError, OptionType};

/// Immutable vanilla option contract.
///
/// Holds the contract terms only; spot, rate and volatility are supplied
/// separately per pricing call, so one contract can be priced under many
/// market states.
///
/// # Invariants
///
/// - `strike > 0` and finite
/// - `maturity >= 0` and finite (years); `maturity == 0` is a contract at expiry
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionContract, OptionType};
///
/// let call = OptionContract::european(100.0, 0.5, OptionType::Call).unwrap();
/// assert_eq!(call.payoff(112.0), 12.0);
/// assert!(call.is_in_the_money(101.0));
///
/// assert!(OptionContract::european(0.0, 0.5, OptionType::Call).is_err());
/// assert!(OptionContract::european(100.0, -1.0, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ContractTerms"))]
pub struct OptionContract {
    strike: f64,
    maturity: f64,
    option_type: OptionType,
    exercise_style: ExerciseStyle,
}

impl OptionContract {
    /// Creates a validated contract.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidStrike` if `strike <= 0` or not finite
    /// - `InstrumentError::InvalidMaturity` if `maturity < 0` or not finite
    pub fn new(
        strike: f64,
        maturity: f64,
        option_type: OptionType,
        exercise_style: ExerciseStyle,
    ) -> Result<Self, InstrumentError> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if !maturity.is_finite() || maturity < 0.0 {
            return Err(InstrumentError::InvalidMaturity { maturity });
        }
        Ok(Self {
            strike,
            maturity,
            option_type,
            exercise_style,
        })
    }

    /// Creates a European contract.
    pub fn european(
        strike: f64,
        maturity: f64,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        Self::new(strike, maturity, option_type, ExerciseStyle::European)
    }

    /// Creates an American contract.
    pub fn american(
        strike: f64,
        maturity: f64,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        Self::new(strike, maturity, option_type, ExerciseStyle::American)
    }

    /// Exercise value at `spot`.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.option_type.payoff(spot, self.strike)
    }

    /// Returns whether immediate exercise at `spot` pays a positive amount.
    #[inline]
    pub fn is_in_the_money(&self, spot: f64) -> bool {
        self.payoff(spot) > 0.0
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// European or American.
    #[inline]
    pub fn exercise_style(&self) -> ExerciseStyle {
        self.exercise_style
    }
}

/// Unvalidated wire form, checked through [`OptionContract::new`] on deserialisation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ContractTerms {
    strike: f64,
    maturity: f64,
    option_type: OptionType,
    #[serde(default)]
    exercise_style: ExerciseStyle,
}

#[cfg(feature = "serde")]
impl TryFrom<ContractTerms> for OptionContract {
    type Error = InstrumentError;

    fn try_from(terms: ContractTerms) -> Result<Self, Self::Error> {
        Self::new(
            terms.strike,
            terms.maturity,
            terms.option_type,
            terms.exercise_style,
        )
    }
}
