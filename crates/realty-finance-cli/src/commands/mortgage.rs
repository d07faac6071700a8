use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use realty_finance_core::amortization::{
    self, AdvancedMortgageInput, MortgageInput, DEFAULT_INSURANCE_RATE, DEFAULT_PMI_RATE,
    DEFAULT_PROPERTY_TAX_RATE,
};

use crate::input;

/// Arguments for the basic mortgage calculation
#[derive(Args)]
pub struct MortgageArgs {
    /// Loan amount (or provide --property-price and --down-payment)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Property purchase price
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Cash down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate as a percentage (e.g. 8.75)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the advanced mortgage calculation
#[derive(Args)]
pub struct MortgageAdvancedArgs {
    /// Property purchase price
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Cash down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 8.75)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Annual PMI rate as a percentage of the loan amount
    #[arg(long)]
    pub pmi_rate: Option<Decimal>,

    /// Annual property-tax rate as a percentage of the price
    #[arg(long)]
    pub property_tax_rate: Option<Decimal>,

    /// Annual insurance rate as a percentage of the price
    #[arg(long)]
    pub insurance_rate: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = match (args.principal, args.property_price) {
            (Some(principal), _) => principal,
            (None, Some(price)) => price - args.down_payment,
            (None, None) => {
                return Err("--principal or --property-price is required (or provide --input)".into())
            }
        };
        MortgageInput {
            principal,
            annual_rate_percent: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_years: args.term_years,
        }
    };

    let result = amortization::calculate_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_mortgage_advanced(
    args: MortgageAdvancedArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let advanced_input: AdvancedMortgageInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AdvancedMortgageInput {
            property_price: args
                .property_price
                .ok_or("--property-price is required (or provide --input)")?,
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_years: args.term_years,
            pmi_rate_percent: args.pmi_rate.unwrap_or(DEFAULT_PMI_RATE),
            property_tax_rate_percent: args.property_tax_rate.unwrap_or(DEFAULT_PROPERTY_TAX_RATE),
            insurance_rate_percent: args.insurance_rate.unwrap_or(DEFAULT_INSURANCE_RATE),
        }
    };

    let result = amortization::calculate_mortgage_advanced(&advanced_input)?;
    Ok(serde_json::to_value(result)?)
}
