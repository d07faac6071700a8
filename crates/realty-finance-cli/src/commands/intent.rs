use clap::Args;
use serde_json::Value;

use realty_finance_core::intent;

/// Arguments for prompt classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// The prompt to classify
    pub prompt: String,

    /// Only report relevance, skip tool routing
    #[arg(long)]
    pub relevance_only: bool,
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let relevance = intent::validate_relevance(&args.prompt);

    // Off-topic prompts never reach the tools
    let invocations = if args.relevance_only || !relevance.is_valid {
        Vec::new()
    } else {
        intent::route(&args.prompt)
    };

    Ok(serde_json::json!({
        "relevance": relevance,
        "invocations": invocations,
    }))
}
