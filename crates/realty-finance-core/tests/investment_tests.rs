use pretty_assertions::assert_eq;
use realty_finance_core::amortization::{calculate_mortgage, MortgageInput};
use realty_finance_core::investment::{
    calculate_cap_rate, calculate_cash_flow, calculate_roi, CapRateInput, CashFlowInput, RoiInput,
};
use realty_finance_core::RealtyFinanceError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_rental_underwriting_scenario() {
    // 320,000 condo, 256,000 loan at 7.2%/30y, rented at 2,400/month
    let mortgage = calculate_mortgage(&MortgageInput {
        principal: dec!(256000),
        annual_rate_percent: dec!(7.2),
        term_years: 30,
    })
    .unwrap();

    // ~1,737.63/month debt service
    let debt_service = mortgage.result.monthly_payment;
    assert!((debt_service - dec!(1737.63)).abs() < dec!(1));

    // Carrying costs: debt service plus 500/month tax, insurance, upkeep
    let cash_flow = calculate_cash_flow(&CashFlowInput {
        monthly_rent: dec!(2400),
        monthly_expenses: debt_service + dec!(500),
    })
    .unwrap();

    assert_eq!(
        cash_flow.result.annual_cash_flow,
        cash_flow.result.monthly_cash_flow * dec!(12)
    );
    assert_eq!(
        cash_flow.result.monthly_cash_flow,
        dec!(2400) - debt_service - dec!(500)
    );
}

#[test]
fn test_cap_rate_and_roi_agree_on_all_cash_purchase() {
    // All-cash purchase: cap rate and first-year ROI are the same figure
    let cap_rate = calculate_cap_rate(&CapRateInput {
        annual_income: dec!(27000),
        property_value: dec!(450000),
    })
    .unwrap();

    let roi = calculate_roi(&RoiInput {
        initial_investment: dec!(450000),
        annual_return: dec!(27000),
        years: 1,
    })
    .unwrap();

    assert_eq!(cap_rate.result.cap_rate_percent, roi.result.roi_percent);
    assert_eq!(cap_rate.result.cap_rate_percent, dec!(6));
}

#[test]
fn test_roi_scales_total_return_with_years() {
    let roi = calculate_roi(&RoiInput {
        initial_investment: dec!(50000),
        annual_return: dec!(4250),
        years: 10,
    })
    .unwrap();

    assert_eq!(roi.result.roi_percent, dec!(8.5));
    assert_eq!(roi.result.total_return, dec!(42500));
}

#[test]
fn test_zero_value_inputs_are_rejected() {
    let err = calculate_cap_rate(&CapRateInput {
        annual_income: dec!(27000),
        property_value: dec!(0),
    })
    .unwrap_err();
    assert!(matches!(err, RealtyFinanceError::InvalidInput { .. }));

    let err = calculate_roi(&RoiInput {
        initial_investment: dec!(-1),
        annual_return: dec!(1000),
        years: 1,
    })
    .unwrap_err();
    assert!(matches!(err, RealtyFinanceError::InvalidInput { .. }));
}

#[test]
fn test_cash_flow_envelope_carries_warning() {
    let result = calculate_cash_flow(&CashFlowInput {
        monthly_rent: dec!(1500),
        monthly_expenses: dec!(1900),
    })
    .unwrap();

    assert!(result.result.monthly_cash_flow < Decimal::ZERO);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("cash-flow negative"));
}
