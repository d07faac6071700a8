use pretty_assertions::assert_eq;
use realty_finance_core::amortization::{
    calculate_mortgage, calculate_mortgage_advanced, AdvancedMortgageInput, MortgageInput,
    DEFAULT_INSURANCE_RATE, DEFAULT_PMI_RATE, DEFAULT_PROPERTY_TAX_RATE,
};
use realty_finance_core::RealtyFinanceError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(principal: Decimal, rate: Decimal, years: u32) -> MortgageInput {
    MortgageInput {
        principal,
        annual_rate_percent: rate,
        term_years: years,
    }
}

fn advanced(price: Decimal, down: Decimal, rate: Decimal, years: u32) -> AdvancedMortgageInput {
    AdvancedMortgageInput {
        property_price: price,
        down_payment: down,
        annual_rate_percent: rate,
        term_years: years,
        pmi_rate_percent: DEFAULT_PMI_RATE,
        property_tax_rate_percent: DEFAULT_PROPERTY_TAX_RATE,
        insurance_rate_percent: DEFAULT_INSURANCE_RATE,
    }
}

// ===========================================================================
// Basic calculation
// ===========================================================================

#[test]
fn test_emi_reference_scenario() {
    // 5,000,000 at 8.75% over 20 years.
    // r = 0.0875/12, n = 240, payment = P*r*(1+r)^n / ((1+r)^n - 1) = 44,185.86
    let result = calculate_mortgage(&loan(dec!(5000000), dec!(8.75), 20)).unwrap();
    let out = &result.result;

    assert_eq!(out.number_of_payments, 240);
    assert!(
        (out.monthly_payment - dec!(44185.86)).abs() < dec!(1),
        "Expected payment ~44,185.86, got {}",
        out.monthly_payment
    );

    // Lifetime identities
    assert!(
        (out.total_paid - out.monthly_payment * dec!(240)).abs() < dec!(1),
        "total_paid should be payment x 240"
    );
    assert_eq!(out.total_interest, out.total_paid - dec!(5000000));
    assert!(out.total_interest > Decimal::ZERO);
}

#[test]
fn test_zero_rate_is_interest_free() {
    let result = calculate_mortgage(&loan(dec!(120000), dec!(0), 10)).unwrap();
    let out = &result.result;

    assert_eq!(out.monthly_payment, dec!(1000));
    assert_eq!(out.total_paid, dec!(120000));
    assert_eq!(out.total_interest, dec!(0));
}

#[test]
fn test_payment_increases_with_rate() {
    let principal = dec!(250000);
    let payments: Vec<Decimal> = [dec!(3), dec!(5), dec!(7), dec!(9)]
        .iter()
        .map(|&rate| {
            calculate_mortgage(&loan(principal, rate, 30))
                .unwrap()
                .result
                .monthly_payment
        })
        .collect();

    assert!(
        payments.windows(2).all(|w| w[0] < w[1]),
        "Payment must be strictly increasing in rate: {payments:?}"
    );
}

#[test]
fn test_payment_decreases_with_term() {
    let principal = dec!(250000);
    let payments: Vec<Decimal> = [10, 15, 20, 30]
        .iter()
        .map(|&years| {
            calculate_mortgage(&loan(principal, dec!(6.5), years))
                .unwrap()
                .result
                .monthly_payment
        })
        .collect();

    assert!(
        payments.windows(2).all(|w| w[0] > w[1]),
        "Payment must be strictly decreasing in term: {payments:?}"
    );
}

#[test]
fn test_identical_inputs_give_identical_results() {
    let input = loan(dec!(375000), dec!(6.875), 25);
    let first = calculate_mortgage(&input).unwrap();
    let second = calculate_mortgage(&input).unwrap();

    assert_eq!(
        serde_json::to_value(&first.result).unwrap(),
        serde_json::to_value(&second.result).unwrap()
    );
}

#[test]
fn test_zero_principal_is_rejected() {
    let err = calculate_mortgage(&loan(dec!(0), dec!(8.75), 20)).unwrap_err();
    assert!(matches!(err, RealtyFinanceError::InvalidInput { .. }));
}

// ===========================================================================
// Advanced calculation
// ===========================================================================

#[test]
fn test_advanced_reference_scenario() {
    // 450,000 price, 10% down, 8.75% over 30 years, default escrow rates.
    // Loan = 405,000; PMI = 405,000 * 0.5% / 12 = 168.75
    // Tax = 450,000 * 1.2% / 12 = 450; Insurance = 450,000 * 0.4% / 12 = 150
    let result =
        calculate_mortgage_advanced(&advanced(dec!(450000), dec!(45000), dec!(8.75), 30)).unwrap();
    let out = &result.result;
    let details = &out.advanced_details;

    assert_eq!(out.loan_amount, dec!(405000));
    assert_eq!(details.down_payment_percent, dec!(10));
    assert!(details.pmi_required);
    assert_eq!(details.monthly_pmi, dec!(168.75));
    assert_eq!(details.monthly_property_tax, dec!(450));
    assert_eq!(details.monthly_insurance, dec!(150));

    // Base payment on 405,000 at 8.75%/30y is ~3,186.15
    assert!(
        (out.monthly_payment - dec!(3186.15)).abs() < dec!(1),
        "Expected payment ~3,186.15, got {}",
        out.monthly_payment
    );

    assert_eq!(
        details.total_monthly_payment,
        out.monthly_payment + details.monthly_pmi + details.monthly_property_tax
            + details.monthly_insurance
    );
    assert_eq!(out.payment_breakdown.principal_and_interest, out.monthly_payment);
    assert_eq!(out.payment_breakdown.estimated_property_tax, dec!(450));
    assert_eq!(out.payment_breakdown.estimated_insurance, dec!(150));
}

#[test]
fn test_pmi_threshold_boundary() {
    // 19.99% down: PMI charged
    let below =
        calculate_mortgage_advanced(&advanced(dec!(100000), dec!(19990), dec!(7), 30)).unwrap();
    assert!(below.result.advanced_details.pmi_required);
    assert!(below.result.advanced_details.monthly_pmi > Decimal::ZERO);

    // Exactly 20% down: no PMI
    let at =
        calculate_mortgage_advanced(&advanced(dec!(100000), dec!(20000), dec!(7), 30)).unwrap();
    assert!(!at.result.advanced_details.pmi_required);
    assert_eq!(at.result.advanced_details.monthly_pmi, dec!(0));

    // Above 20% down: no PMI
    let above =
        calculate_mortgage_advanced(&advanced(dec!(100000), dec!(25000), dec!(7), 30)).unwrap();
    assert!(!above.result.advanced_details.pmi_required);
    assert_eq!(above.result.advanced_details.monthly_pmi, dec!(0));
}

#[test]
fn test_advanced_matches_basic_on_derived_principal() {
    let advanced_result =
        calculate_mortgage_advanced(&advanced(dec!(450000), dec!(90000), dec!(6.5), 30)).unwrap();
    let basic_result = calculate_mortgage(&loan(dec!(360000), dec!(6.5), 30)).unwrap();

    assert_eq!(
        advanced_result.result.monthly_payment,
        basic_result.result.monthly_payment
    );
    assert_eq!(
        advanced_result.result.total_interest,
        basic_result.result.total_interest
    );
}

#[test]
fn test_advanced_rejects_bad_down_payment() {
    let err = calculate_mortgage_advanced(&advanced(dec!(450000), dec!(450000), dec!(6.5), 30))
        .unwrap_err();
    assert!(matches!(
        err,
        RealtyFinanceError::InvalidInput { ref field, .. } if field == "down_payment"
    ));

    let err =
        calculate_mortgage_advanced(&advanced(dec!(450000), dec!(-1), dec!(6.5), 30)).unwrap_err();
    assert!(matches!(err, RealtyFinanceError::InvalidInput { .. }));
}

#[test]
fn test_serde_defaults_for_escrow_rates() {
    let input: AdvancedMortgageInput = serde_json::from_str(
        r#"{
            "property_price": "450000",
            "down_payment": "45000",
            "annual_rate_percent": "8.75",
            "term_years": 30
        }"#,
    )
    .unwrap();

    assert_eq!(input.pmi_rate_percent, dec!(0.5));
    assert_eq!(input.property_tax_rate_percent, dec!(1.2));
    assert_eq!(input.insurance_rate_percent, dec!(0.4));
}
