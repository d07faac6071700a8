use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use realty_finance_core::investment::{
    self, BreakEvenInput, CapRateInput, CashFlowInput, RoiInput,
};

use crate::input;

/// Arguments for ROI calculation
#[derive(Args)]
pub struct RoiArgs {
    /// Cash invested up front
    #[arg(long)]
    pub initial_investment: Option<Decimal>,

    /// Net return per year
    #[arg(long)]
    pub annual_return: Option<Decimal>,

    /// Holding period in years
    #[arg(long, default_value = "1")]
    pub years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for cash-flow calculation
#[derive(Args)]
pub struct CashFlowArgs {
    /// Gross monthly rent
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Total monthly carrying costs
    #[arg(long)]
    pub monthly_expenses: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for cap-rate calculation
#[derive(Args)]
pub struct CapRateArgs {
    /// Annual net operating income
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Property value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for break-even calculation
#[derive(Args)]
pub struct BreakEvenArgs {
    /// Fixed costs to recover
    #[arg(long)]
    pub fixed_costs: Option<Decimal>,

    /// Variable cost per unit
    #[arg(long)]
    pub variable_cost: Option<Decimal>,

    /// Sale price per unit
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_roi(args: RoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi_input: RoiInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RoiInput {
            initial_investment: args
                .initial_investment
                .ok_or("--initial-investment is required (or provide --input)")?,
            annual_return: args
                .annual_return
                .ok_or("--annual-return is required (or provide --input)")?,
            years: args.years,
        }
    };

    let result = investment::calculate_roi(&roi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cash_flow(args: CashFlowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cash_flow_input: CashFlowInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CashFlowInput {
            monthly_rent: args
                .monthly_rent
                .ok_or("--monthly-rent is required (or provide --input)")?,
            monthly_expenses: args
                .monthly_expenses
                .ok_or("--monthly-expenses is required (or provide --input)")?,
        }
    };

    let result = investment::calculate_cash_flow(&cash_flow_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cap_rate(args: CapRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cap_rate_input: CapRateInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CapRateInput {
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
        }
    };

    let result = investment::calculate_cap_rate(&cap_rate_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let break_even_input: BreakEvenInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        BreakEvenInput {
            fixed_costs: args
                .fixed_costs
                .ok_or("--fixed-costs is required (or provide --input)")?,
            variable_cost_per_unit: args
                .variable_cost
                .ok_or("--variable-cost is required (or provide --input)")?,
            price_per_unit: args
                .price
                .ok_or("--price is required (or provide --input)")?,
        }
    };

    let result = investment::calculate_break_even(&break_even_input)?;
    Ok(serde_json::to_value(result)?)
}
