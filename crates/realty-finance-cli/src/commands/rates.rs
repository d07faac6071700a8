use clap::Args;
use serde_json::Value;

use realty_finance_core::rates::{self, LoanType, RateQuery};

use crate::input;

/// Arguments for the indicative-rates lookup
#[derive(Args)]
pub struct RatesArgs {
    /// Location to quote for (e.g. "Austin, TX")
    #[arg(long)]
    pub location: Option<String>,

    /// Loan type: conventional, fha, va, or jumbo
    #[arg(long, default_value = "conventional")]
    pub loan_type: String,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_rates(args: RatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let query: RateQuery = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RateQuery {
            location: args
                .location
                .ok_or("--location is required (or provide --input)")?,
            loan_type: parse_loan_type(&args.loan_type)?,
        }
    };

    let result = rates::estimate_rates(&query)?;
    Ok(serde_json::to_value(result)?)
}

fn parse_loan_type(raw: &str) -> Result<LoanType, Box<dyn std::error::Error>> {
    match raw.to_lowercase().as_str() {
        "conventional" => Ok(LoanType::Conventional),
        "fha" => Ok(LoanType::Fha),
        "va" => Ok(LoanType::Va),
        "jumbo" => Ok(LoanType::Jumbo),
        other => Err(format!("Unknown loan type '{other}'").into()),
    }
}
