mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::intent::ClassifyArgs;
use commands::investment::{BreakEvenArgs, CapRateArgs, CashFlowArgs, RoiArgs};
use commands::mortgage::{MortgageAdvancedArgs, MortgageArgs};
use commands::rates::RatesArgs;

/// Real-estate finance calculations
#[derive(Parser)]
#[command(
    name = "refi",
    version,
    about = "Real-estate finance calculations",
    long_about = "A CLI for real-estate finance calculations with decimal precision. \
                  Supports mortgage amortization with PMI and escrow estimates, \
                  investment metrics (ROI, cash flow, cap rate, break-even), \
                  indicative interest rates, and keyword intent classification."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a level monthly mortgage payment and lifetime totals
    Mortgage(MortgageArgs),
    /// Mortgage payment including PMI, property tax, and insurance escrow
    MortgageAdvanced(MortgageAdvancedArgs),
    /// Simple annual return on investment
    Roi(RoiArgs),
    /// Net rental cash flow, monthly and annualized
    CashFlow(CashFlowArgs),
    /// Capitalization rate (NOI / value)
    CapRate(CapRateArgs),
    /// Break-even unit count from fixed costs and margin
    BreakEven(BreakEvenArgs),
    /// Indicative mortgage rates for a location
    Rates(RatesArgs),
    /// Classify a free-text prompt: relevance score and tool routing
    Classify(ClassifyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::MortgageAdvanced(args) => commands::mortgage::run_mortgage_advanced(args),
        Commands::Roi(args) => commands::investment::run_roi(args),
        Commands::CashFlow(args) => commands::investment::run_cash_flow(args),
        Commands::CapRate(args) => commands::investment::run_cap_rate(args),
        Commands::BreakEven(args) => commands::investment::run_break_even(args),
        Commands::Rates(args) => commands::rates::run_rates(args),
        Commands::Classify(args) => commands::intent::run_classify(args),
        Commands::Version => {
            println!("refi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
