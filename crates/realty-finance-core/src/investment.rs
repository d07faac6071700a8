//! Investment screening metrics: ROI, cash flow, cap rate, break-even.
//!
//! Quick single-property figures, not a full underwriting model.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RealtyFinanceError;
use crate::types::{round_cents, with_metadata, ComputationOutput, Money};
use crate::RealtyFinanceResult;

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Return on investment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    /// Cash invested up front.
    pub initial_investment: Money,
    /// Net return per year.
    pub annual_return: Money,
    /// Holding period in years.
    #[serde(default = "default_years")]
    pub years: u32,
}

fn default_years() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiOutput {
    /// Annual return as a percentage of the initial investment.
    pub roi_percent: Decimal,
    /// Annual return times holding period.
    pub total_return: Money,
}

/// Simple annual return on investment.
pub fn calculate_roi(input: &RoiInput) -> RealtyFinanceResult<ComputationOutput<RoiOutput>> {
    let start = Instant::now();

    if input.initial_investment <= Decimal::ZERO {
        return Err(RealtyFinanceError::InvalidInput {
            field: "initial_investment".into(),
            reason: "Initial investment must be positive".into(),
        });
    }
    if input.years == 0 {
        return Err(RealtyFinanceError::InvalidInput {
            field: "years".into(),
            reason: "Holding period must be at least 1 year".into(),
        });
    }

    let roi_percent = input.annual_return / input.initial_investment * HUNDRED;
    let total_return = input.annual_return * Decimal::from(input.years);

    let output = RoiOutput {
        roi_percent: round_cents(roi_percent),
        total_return: round_cents(total_return),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple annual ROI on invested cash",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Rental cash flow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowInput {
    pub monthly_rent: Money,
    /// All monthly carrying costs: debt service, tax, insurance, maintenance.
    pub monthly_expenses: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowOutput {
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
}

/// Net rental cash flow, monthly and annualized.
pub fn calculate_cash_flow(
    input: &CashFlowInput,
) -> RealtyFinanceResult<ComputationOutput<CashFlowOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.monthly_rent < Decimal::ZERO {
        return Err(RealtyFinanceError::InvalidInput {
            field: "monthly_rent".into(),
            reason: "Rent cannot be negative".into(),
        });
    }
    if input.monthly_expenses < Decimal::ZERO {
        return Err(RealtyFinanceError::InvalidInput {
            field: "monthly_expenses".into(),
            reason: "Expenses cannot be negative".into(),
        });
    }

    let monthly_cash_flow = input.monthly_rent - input.monthly_expenses;
    if monthly_cash_flow < Decimal::ZERO {
        warnings.push("Property is cash-flow negative at these rents and expenses".into());
    }

    let output = CashFlowOutput {
        monthly_cash_flow: round_cents(monthly_cash_flow),
        annual_cash_flow: round_cents(monthly_cash_flow * MONTHS_PER_YEAR),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rent minus carrying costs",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Capitalization rate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapRateInput {
    /// Annual net operating income.
    pub annual_income: Money,
    pub property_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapRateOutput {
    pub cap_rate_percent: Decimal,
}

/// Capitalization rate: NOI over property value.
pub fn calculate_cap_rate(
    input: &CapRateInput,
) -> RealtyFinanceResult<ComputationOutput<CapRateOutput>> {
    let start = Instant::now();

    if input.property_value <= Decimal::ZERO {
        return Err(RealtyFinanceError::InvalidInput {
            field: "property_value".into(),
            reason: "Property value must be positive".into(),
        });
    }

    let cap_rate_percent = input.annual_income / input.property_value * HUNDRED;

    let output = CapRateOutput {
        cap_rate_percent: round_cents(cap_rate_percent),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Direct capitalization: NOI / value",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Break-even
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub fixed_costs: Money,
    pub variable_cost_per_unit: Money,
    pub price_per_unit: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenOutput {
    /// Units needed to cover fixed costs at the given margin.
    pub break_even_units: Decimal,
}

/// Break-even unit count from fixed costs and per-unit contribution margin.
pub fn calculate_break_even(
    input: &BreakEvenInput,
) -> RealtyFinanceResult<ComputationOutput<BreakEvenOutput>> {
    let start = Instant::now();

    if input.fixed_costs < Decimal::ZERO {
        return Err(RealtyFinanceError::InvalidInput {
            field: "fixed_costs".into(),
            reason: "Fixed costs cannot be negative".into(),
        });
    }
    if input.price_per_unit <= input.variable_cost_per_unit {
        return Err(RealtyFinanceError::InvalidInput {
            field: "price_per_unit".into(),
            reason: "Price per unit must exceed variable cost per unit".into(),
        });
    }

    let margin = input.price_per_unit - input.variable_cost_per_unit;
    let break_even_units = input.fixed_costs / margin;

    let output = BreakEvenOutput {
        break_even_units: round_cents(break_even_units),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed costs / contribution margin",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_roi_basic() {
        let input = RoiInput {
            initial_investment: dec!(100000),
            annual_return: dec!(8500),
            years: 3,
        };
        let result = calculate_roi(&input).unwrap();
        assert_eq!(result.result.roi_percent, dec!(8.5));
        assert_eq!(result.result.total_return, dec!(25500));
    }

    #[test]
    fn test_roi_rejects_zero_investment() {
        let input = RoiInput {
            initial_investment: dec!(0),
            annual_return: dec!(1000),
            years: 1,
        };
        assert!(calculate_roi(&input).is_err());
    }

    #[test]
    fn test_negative_cash_flow_warns() {
        let input = CashFlowInput {
            monthly_rent: dec!(1800),
            monthly_expenses: dec!(2100),
        };
        let result = calculate_cash_flow(&input).unwrap();
        assert_eq!(result.result.monthly_cash_flow, dec!(-300));
        assert_eq!(result.result.annual_cash_flow, dec!(-3600));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_cap_rate_basic() {
        let input = CapRateInput {
            annual_income: dec!(27000),
            property_value: dec!(450000),
        };
        let result = calculate_cap_rate(&input).unwrap();
        assert_eq!(result.result.cap_rate_percent, dec!(6));
    }

    #[test]
    fn test_break_even_rejects_negative_margin() {
        let input = BreakEvenInput {
            fixed_costs: dec!(5000),
            variable_cost_per_unit: dec!(12),
            price_per_unit: dec!(12),
        };
        assert!(calculate_break_even(&input).is_err());
    }

    #[test]
    fn test_break_even_basic() {
        let input = BreakEvenInput {
            fixed_costs: dec!(5000),
            variable_cost_per_unit: dec!(10),
            price_per_unit: dec!(35),
        };
        let result = calculate_break_even(&input).unwrap();
        assert_eq!(result.result.break_even_units, dec!(200));
    }
}
