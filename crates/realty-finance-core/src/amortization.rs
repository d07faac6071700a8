//! Level-payment mortgage amortization with PMI, property tax, and insurance.
//!
//! The calculators are pure and synchronous: validate, compute the closed-form
//! annuity payment, derive totals, round to cents. All math in
//! `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RealtyFinanceError;
use crate::types::{round_cents, with_metadata, ComputationOutput, Money, RatePercent};
use crate::RealtyFinanceResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest loan term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 50;

/// Down-payment percentage at or above which PMI is not charged.
const PMI_EQUITY_THRESHOLD: Decimal = dec!(20);

/// Annual rate above which a warning is attached to the output.
const HIGH_RATE_WARNING_THRESHOLD: Decimal = dec!(25);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Default annual PMI rate as a percentage of the loan amount.
pub const DEFAULT_PMI_RATE: Decimal = dec!(0.5);

/// Default annual property-tax rate as a percentage of the property price.
pub const DEFAULT_PROPERTY_TAX_RATE: Decimal = dec!(1.2);

/// Default annual hazard-insurance rate as a percentage of the property price.
pub const DEFAULT_INSURANCE_RATE: Decimal = dec!(0.4);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Input for the basic mortgage calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Loan amount on which interest accrues.
    pub principal: Money,
    /// Annual interest rate as a percentage (8.75 = 8.75%).
    pub annual_rate_percent: RatePercent,
    /// Loan term in whole years.
    pub term_years: u32,
}

/// Input for the advanced calculation with PMI and escrow items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedMortgageInput {
    /// Purchase price of the property.
    pub property_price: Money,
    /// Cash down payment; the loan amount is price minus down payment.
    pub down_payment: Money,
    /// Annual interest rate as a percentage.
    pub annual_rate_percent: RatePercent,
    /// Loan term in whole years.
    pub term_years: u32,
    /// Annual PMI rate as a percentage of the loan amount.
    #[serde(default = "default_pmi_rate")]
    pub pmi_rate_percent: RatePercent,
    /// Annual property-tax rate as a percentage of the property price.
    #[serde(default = "default_property_tax_rate")]
    pub property_tax_rate_percent: RatePercent,
    /// Annual insurance rate as a percentage of the property price.
    #[serde(default = "default_insurance_rate")]
    pub insurance_rate_percent: RatePercent,
}

fn default_pmi_rate() -> Decimal {
    DEFAULT_PMI_RATE
}

fn default_property_tax_rate() -> Decimal {
    DEFAULT_PROPERTY_TAX_RATE
}

fn default_insurance_rate() -> Decimal {
    DEFAULT_INSURANCE_RATE
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Result of the basic mortgage calculation. All monetary fields are rounded
/// to cents independently from the unrounded intermediates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    /// Level monthly payment (principal and interest).
    pub monthly_payment: Money,
    /// Total number of monthly payments over the term.
    pub number_of_payments: u32,
    /// Monthly payment times number of payments.
    pub total_paid: Money,
    /// Total paid minus principal.
    pub total_interest: Money,
}

/// Monthly payment split into principal-and-interest plus escrow estimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal_and_interest: Money,
    pub estimated_property_tax: Money,
    pub estimated_insurance: Money,
}

/// PMI and escrow detail for the advanced calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedDetails {
    /// Down payment as a percentage of the property price.
    pub down_payment_percent: Decimal,
    /// Monthly mortgage-insurance charge; zero at or above 20% equity.
    pub monthly_pmi: Money,
    pub monthly_property_tax: Money,
    pub monthly_insurance: Money,
    /// Principal and interest plus PMI, tax, and insurance.
    pub total_monthly_payment: Money,
    /// Whether the down payment is below the 20% PMI threshold.
    pub pmi_required: bool,
}

/// Result of the advanced mortgage calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedMortgageOutput {
    /// Property price minus down payment.
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    pub total_paid: Money,
    pub total_interest: Money,
    pub payment_breakdown: PaymentBreakdown,
    pub advanced_details: AdvancedDetails,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the level monthly payment and lifetime totals for a loan.
///
/// Zero-interest loans degenerate to straight-line division of the principal,
/// so `total_interest` is exactly zero in that case.
pub fn calculate_mortgage(
    input: &MortgageInput,
) -> RealtyFinanceResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_terms(
        input.principal,
        "principal",
        input.annual_rate_percent,
        input.term_years,
        &mut warnings,
    )?;

    let (payment, number_of_payments) =
        level_payment(input.principal, input.annual_rate_percent, input.term_years);
    let total_paid = payment * Decimal::from(number_of_payments);
    let total_interest = total_paid - input.principal;

    let output = MortgageOutput {
        monthly_payment: round_cents(payment),
        number_of_payments,
        total_paid: round_cents(total_paid),
        total_interest: round_cents(total_interest),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization, monthly compounding",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Calculate a full monthly housing payment: principal and interest plus PMI
/// (when the down payment is below 20% of the price), property tax, and
/// insurance escrow estimates.
pub fn calculate_mortgage_advanced(
    input: &AdvancedMortgageInput,
) -> RealtyFinanceResult<ComputationOutput<AdvancedMortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.property_price <= Decimal::ZERO {
        return Err(RealtyFinanceError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must be positive".into(),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(RealtyFinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    if input.down_payment >= input.property_price {
        return Err(RealtyFinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment must be less than the property price".into(),
        });
    }
    for (field, rate) in [
        ("pmi_rate_percent", input.pmi_rate_percent),
        ("property_tax_rate_percent", input.property_tax_rate_percent),
        ("insurance_rate_percent", input.insurance_rate_percent),
    ] {
        if rate < Decimal::ZERO {
            return Err(RealtyFinanceError::InvalidInput {
                field: field.into(),
                reason: "Rate cannot be negative".into(),
            });
        }
    }

    let loan_amount = input.property_price - input.down_payment;
    validate_loan_terms(
        loan_amount,
        "principal",
        input.annual_rate_percent,
        input.term_years,
        &mut warnings,
    )?;

    let (payment, number_of_payments) =
        level_payment(loan_amount, input.annual_rate_percent, input.term_years);
    let total_paid = payment * Decimal::from(number_of_payments);
    let total_interest = total_paid - loan_amount;

    // The PMI decision uses the unrounded percentage; only the reported
    // figure is rounded.
    let down_payment_percent = input.down_payment / input.property_price * HUNDRED;
    let pmi_required = down_payment_percent < PMI_EQUITY_THRESHOLD;

    let monthly_pmi = if pmi_required {
        loan_amount * input.pmi_rate_percent / HUNDRED / MONTHS_PER_YEAR
    } else {
        Decimal::ZERO
    };
    let monthly_property_tax =
        input.property_price * input.property_tax_rate_percent / HUNDRED / MONTHS_PER_YEAR;
    let monthly_insurance =
        input.property_price * input.insurance_rate_percent / HUNDRED / MONTHS_PER_YEAR;

    // Each component is rounded once, then summed, so the reported total is
    // exactly the sum of the reported parts.
    let monthly_payment = round_cents(payment);
    let monthly_pmi = round_cents(monthly_pmi);
    let monthly_property_tax = round_cents(monthly_property_tax);
    let monthly_insurance = round_cents(monthly_insurance);
    let total_monthly_payment =
        monthly_payment + monthly_pmi + monthly_property_tax + monthly_insurance;

    let output = AdvancedMortgageOutput {
        loan_amount: round_cents(loan_amount),
        monthly_payment,
        number_of_payments,
        total_paid: round_cents(total_paid),
        total_interest: round_cents(total_interest),
        payment_breakdown: PaymentBreakdown {
            principal_and_interest: monthly_payment,
            estimated_property_tax: monthly_property_tax,
            estimated_insurance: monthly_insurance,
        },
        advanced_details: AdvancedDetails {
            down_payment_percent: round_cents(down_payment_percent),
            monthly_pmi,
            monthly_property_tax,
            monthly_insurance,
            total_monthly_payment,
            pmi_required,
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization with PMI and escrow estimates",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Unrounded level monthly payment and the payment count.
///
/// Callers must have validated the inputs; `term_years >= 1` guarantees a
/// non-zero divisor in the zero-rate branch.
fn level_payment(principal: Money, annual_rate_percent: RatePercent, term_years: u32) -> (Money, u32) {
    let number_of_payments = term_years * 12;
    let n = Decimal::from(number_of_payments);

    if annual_rate_percent.is_zero() {
        return (principal / n, number_of_payments);
    }

    let monthly_rate = annual_rate_percent / HUNDRED / MONTHS_PER_YEAR;
    let growth = (Decimal::ONE + monthly_rate).powi(number_of_payments as i64);
    let payment = principal * monthly_rate * growth / (growth - Decimal::ONE);

    (payment, number_of_payments)
}

fn validate_loan_terms(
    principal: Money,
    principal_field: &str,
    annual_rate_percent: RatePercent,
    term_years: u32,
    warnings: &mut Vec<String>,
) -> RealtyFinanceResult<()> {
    if principal <= Decimal::ZERO {
        return Err(RealtyFinanceError::InvalidInput {
            field: principal_field.into(),
            reason: "Loan principal must be positive".into(),
        });
    }
    if term_years == 0 || term_years > MAX_TERM_YEARS {
        return Err(RealtyFinanceError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term must be between 1 and {MAX_TERM_YEARS} years"),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(RealtyFinanceError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if annual_rate_percent > HIGH_RATE_WARNING_THRESHOLD {
        warnings.push(format!(
            "Annual rate of {annual_rate_percent}% is unusually high; check the input units"
        ));
    }
    Ok(())
}
