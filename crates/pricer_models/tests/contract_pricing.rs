//! End-to-end checks of contracts priced under a market state.

use approx::assert_relative_eq;
use pricer_core::market_data::{ConstantVolatility, MarketState};
use pricer_core::types::PricingError;
use pricer_models::analytical::{
    contract_implied_volatility, AnalyticalError, BlackScholes, ImpliedVolConfig,
};
use pricer_models::instruments::{ExerciseStyle, InstrumentError, OptionContract, OptionType};

#[test]
fn test_reference_prices() {
    let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
    let model = BlackScholes::from_market(&market).unwrap();

    let call = OptionContract::european(100.0, 1.0, OptionType::Call).unwrap();
    let put = OptionContract::european(100.0, 1.0, OptionType::Put).unwrap();

    assert_relative_eq!(
        model.price_contract(&call).unwrap(),
        10.450583572185567,
        epsilon = 1e-10
    );
    assert_relative_eq!(
        model.price_contract(&put).unwrap(),
        5.573526022256968,
        epsilon = 1e-10
    );
}

#[test]
fn test_contract_from_tags() {
    let option_type: OptionType = "Call".parse().unwrap();
    let style: ExerciseStyle = " american ".parse().unwrap();
    let contract = OptionContract::new(95.0, 0.25, option_type, style).unwrap();

    assert!(contract.exercise_style().is_american());
    assert_eq!(contract.payoff(100.0), 5.0);

    let bad = "straddle".parse::<OptionType>();
    assert!(matches!(bad, Err(InstrumentError::UnknownOptionType { .. })));
    let pricing: PricingError = bad.unwrap_err().into();
    assert!(matches!(pricing, PricingError::InvalidInput(_)));
}

#[test]
fn test_volatility_from_estimator() {
    let estimator = ConstantVolatility::new(0.35).unwrap();
    let market = MarketState::from_estimator(100.0, 0.01, &estimator).unwrap();
    let contract = OptionContract::european(105.0, 0.5, OptionType::Put).unwrap();

    let price = BlackScholes::from_market(&market)
        .unwrap()
        .price_contract(&contract)
        .unwrap();
    let sigma = contract_implied_volatility(&contract, &market, price, &ImpliedVolConfig::default())
        .unwrap();

    assert_relative_eq!(sigma, 0.35, epsilon = 1e-4);
}

#[test]
fn test_valuation_bundle_matches_components() {
    let market = MarketState::new(120.0, 0.03, 0.25).unwrap();
    let model = BlackScholes::from_market(&market).unwrap();
    let contract = OptionContract::european(110.0, 2.0, OptionType::Call).unwrap();

    let valuation = model.valuation(&contract).unwrap();
    assert_eq!(valuation.price, model.price(110.0, 2.0, OptionType::Call));
    assert_eq!(valuation.greeks, model.greeks(110.0, 2.0, OptionType::Call));
    assert!(valuation.greeks.delta > 0.0 && valuation.greeks.delta < 1.0);
}

#[test]
fn test_american_rejected_by_closed_form() {
    let market = MarketState::new(100.0, 0.05, 0.2).unwrap();
    let model = BlackScholes::from_market(&market).unwrap();
    let contract = OptionContract::american(100.0, 1.0, OptionType::Put).unwrap();

    let err = model.valuation(&contract).unwrap_err();
    assert!(matches!(err, AnalyticalError::UnsupportedExerciseStyle { .. }));
    assert!(matches!(
        PricingError::from(err),
        PricingError::UnsupportedInstrument(_)
    ));
}

#[test]
fn test_same_contract_many_markets() {
    let contract = OptionContract::european(100.0, 1.0, OptionType::Call).unwrap();
    let base = MarketState::new(100.0, 0.05, 0.1).unwrap();

    let prices: Vec<f64> = [0.1, 0.2, 0.4]
        .iter()
        .map(|&sigma| {
            let market = base.with_volatility(sigma).unwrap();
            BlackScholes::from_market(&market)
                .unwrap()
                .price_contract(&contract)
                .unwrap()
        })
        .collect();

    // Price is increasing in volatility.
    assert!(prices.windows(2).all(|w| w[0] < w[1]));
}
