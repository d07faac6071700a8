//! Keyword relevance scoring and tool routing for free-text questions.
//!
//! The router is a declarative trigger table: each tool lists the substrings
//! that select it, and parameter extraction happens once per matched tool.
//! Classification only; executing the selected tools is the caller's job.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::RatePercent;

// ---------------------------------------------------------------------------
// Relevance
// ---------------------------------------------------------------------------

/// Substrings indicating a property or real-estate topic.
const PROPERTY_KEYWORDS: &[&str] = &[
    "property",
    "house",
    "home",
    "apartment",
    "condo",
    "real estate",
    "buy",
    "sell",
    "rent",
    "mortgage",
    "loan",
    "investment",
    "roi",
    "bedroom",
    "bathroom",
    "square feet",
    "price",
    "location",
    "neighborhood",
    "market",
    "listing",
    "agent",
    "broker",
];

/// Substrings indicating an off-topic question worth redirecting.
const OFF_TOPIC_KEYWORDS: &[&str] = &[
    "weather",
    "sports",
    "politics",
    "entertainment",
    "cooking",
    "travel",
    "health",
    "technology",
    "science",
    "history",
];

const REDIRECT_MESSAGE: &str = "I'm here to help with property investment and real estate \
     questions. How can I assist you with property details, market analysis, or investment \
     calculations?";

/// Minimum relevance score for a prompt to be considered on-topic.
const RELEVANCE_THRESHOLD: Decimal = dec!(0.2);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceResult {
    pub is_valid: bool,
    /// Property-keyword density in [0, 1].
    pub relevance_score: Decimal,
    pub property_hits: usize,
    pub off_topic_hits: usize,
    pub reason: String,
    /// Canned reply to send instead of running tools, for off-topic prompts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Score a prompt against the property keyword lists.
pub fn validate_relevance(prompt: &str) -> RelevanceResult {
    let lowered = prompt.to_lowercase();

    let property_hits = PROPERTY_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .count();
    let off_topic_hits = OFF_TOPIC_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .count();

    let word_count = Decimal::from(prompt.split_whitespace().count());
    let denominator = (word_count * dec!(0.1)).max(Decimal::ONE);
    let relevance_score = (Decimal::from(property_hits) / denominator).min(Decimal::ONE);

    let is_valid = property_hits > 0 && relevance_score > RELEVANCE_THRESHOLD;

    if is_valid {
        RelevanceResult {
            is_valid,
            relevance_score,
            property_hits,
            off_topic_hits,
            reason: "Query is property-related and valid".into(),
            redirect: None,
        }
    } else {
        RelevanceResult {
            is_valid,
            relevance_score,
            property_hits,
            off_topic_hits,
            reason: "Query not related to real estate or property investment".into(),
            redirect: Some(REDIRECT_MESSAGE.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Tools the router can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    SearchPropertyInfo,
    CalculateMortgage,
    GetInterestRates,
    GetPropertyDetails,
    GetUserSavedProperties,
    FinancialCalculatorRoi,
}

/// Trigger table: any listed substring selects the tool.
const TRIGGERS: &[(Tool, &[&str])] = &[
    (
        Tool::SearchPropertyInfo,
        &["find", "search", "show", "properties", "houses", "apartments"],
    ),
    (
        Tool::CalculateMortgage,
        &["mortgage", "payment", "loan", "calculate"],
    ),
    (
        Tool::GetInterestRates,
        &["interest", "rate", "rates", "current"],
    ),
    (
        Tool::GetPropertyDetails,
        &["details", "information", "about property"],
    ),
    (
        Tool::GetUserSavedProperties,
        &["saved", "my properties", "bookmarked"],
    ),
    (
        Tool::FinancialCalculatorRoi,
        &["roi", "return", "investment", "profit"],
    ),
];

/// Fallback rate when the prompt names a price and down payment but no rate.
const FALLBACK_RATE_PERCENT: Decimal = dec!(7.2);
const FALLBACK_TERM_YEARS: u32 = 30;
const FALLBACK_LOCATION: &str = "United States";

/// A tool the router selected, with parameters extracted from the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "camelCase")]
pub enum ToolInvocation {
    #[serde(rename_all = "camelCase")]
    SearchPropertyInfo {
        query: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    CalculateMortgage {
        property_price: Decimal,
        down_payment: Decimal,
        annual_rate_percent: RatePercent,
        term_years: u32,
    },
    #[serde(rename_all = "camelCase")]
    GetInterestRates { location: String },
    #[serde(rename_all = "camelCase")]
    GetPropertyDetails { property_id: String },
    GetUserSavedProperties,
    #[serde(rename_all = "camelCase")]
    FinancialCalculatorRoi {
        initial_investment: Decimal,
        annual_return: Decimal,
    },
}

/// Select tools for a prompt and extract their parameters.
///
/// A tool whose trigger fires but whose required parameters cannot be
/// extracted is dropped rather than invoked with guesses.
pub fn route(message: &str) -> Vec<ToolInvocation> {
    let lowered = message.to_lowercase();
    let numbers = extract_numbers(message);
    let location = extract_location(&lowered);

    let mut invocations = Vec::new();

    for (tool, keywords) in TRIGGERS {
        if !keywords.iter().any(|k| lowered.contains(k)) {
            continue;
        }

        let invocation = match tool {
            Tool::SearchPropertyInfo => Some(ToolInvocation::SearchPropertyInfo {
                query: message.to_string(),
                location: location.clone(),
            }),
            Tool::CalculateMortgage => {
                // Needs at least a price and a down payment
                if numbers.len() >= 2 {
                    Some(ToolInvocation::CalculateMortgage {
                        property_price: numbers[0],
                        down_payment: numbers[1],
                        annual_rate_percent: numbers
                            .get(2)
                            .copied()
                            .unwrap_or(FALLBACK_RATE_PERCENT),
                        term_years: FALLBACK_TERM_YEARS,
                    })
                } else {
                    None
                }
            }
            Tool::GetInterestRates => Some(ToolInvocation::GetInterestRates {
                location: location
                    .clone()
                    .unwrap_or_else(|| FALLBACK_LOCATION.to_string()),
            }),
            Tool::GetPropertyDetails => {
                extract_property_id(&lowered).map(|property_id| {
                    ToolInvocation::GetPropertyDetails { property_id }
                })
            }
            Tool::GetUserSavedProperties => Some(ToolInvocation::GetUserSavedProperties),
            Tool::FinancialCalculatorRoi => {
                if numbers.len() >= 2 {
                    Some(ToolInvocation::FinancialCalculatorRoi {
                        initial_investment: numbers[0],
                        annual_return: numbers[1],
                    })
                } else {
                    None
                }
            }
        };

        if let Some(invocation) = invocation {
            invocations.push(invocation);
        }
    }

    invocations
}

// ---------------------------------------------------------------------------
// Extraction helpers
// ---------------------------------------------------------------------------

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:,\d{3})*(?:\.\d+)?").expect("valid number pattern"));

static PROPERTY_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"prop_\w+").expect("valid property id pattern"));

/// Locations the extractor recognizes, lowercased.
const KNOWN_LOCATIONS: &[&str] = &[
    "downtown",
    "midtown",
    "uptown",
    "suburbs",
    "california",
    "texas",
    "florida",
    "new york",
    "chicago",
    "los angeles",
    "san francisco",
    "miami",
    "dallas",
    "houston",
    "atlanta",
    "seattle",
    "denver",
];

/// All numeric literals in the prompt, in order of appearance. Thousands
/// separators are accepted and stripped.
pub fn extract_numbers(message: &str) -> Vec<Decimal> {
    NUMBER_PATTERN
        .find_iter(message)
        .filter_map(|m| m.as_str().replace(',', "").parse::<Decimal>().ok())
        .collect()
}

/// First known location mentioned in the (lowercased) prompt, title-cased.
pub fn extract_location(lowered: &str) -> Option<String> {
    KNOWN_LOCATIONS
        .iter()
        .find(|loc| lowered.contains(*loc))
        .map(|loc| title_case(loc))
}

fn extract_property_id(lowered: &str) -> Option<String> {
    PROPERTY_ID_PATTERN
        .find(lowered)
        .map(|m| m.as_str().to_string())
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_on_topic_prompt_is_valid() {
        let result = validate_relevance("What mortgage can I afford on a house in Austin?");
        assert!(result.is_valid);
        assert!(result.redirect.is_none());
        assert!(result.relevance_score > dec!(0.2));
    }

    #[test]
    fn test_off_topic_prompt_redirects() {
        let result = validate_relevance("What's the weather like for the game tonight?");
        assert!(!result.is_valid);
        assert_eq!(result.property_hits, 0);
        assert!(result.redirect.is_some());
    }

    #[test]
    fn test_mortgage_route_requires_two_numbers() {
        let none = route("how do I calculate a mortgage payment?");
        assert!(!none
            .iter()
            .any(|i| matches!(i, ToolInvocation::CalculateMortgage { .. })));

        let some = route("calculate my mortgage on a 450000 house with 45000 down");
        let mortgage = some
            .iter()
            .find(|i| matches!(i, ToolInvocation::CalculateMortgage { .. }))
            .expect("mortgage tool should fire");
        match mortgage {
            ToolInvocation::CalculateMortgage {
                property_price,
                down_payment,
                annual_rate_percent,
                term_years,
            } => {
                assert_eq!(*property_price, dec!(450000));
                assert_eq!(*down_payment, dec!(45000));
                assert_eq!(*annual_rate_percent, dec!(7.2));
                assert_eq!(*term_years, 30);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_rate_route_uses_location_or_fallback() {
        let routed = route("what are current interest rates in Texas?");
        assert!(routed.contains(&ToolInvocation::GetInterestRates {
            location: "Texas".into()
        }));

        let fallback = route("what are current interest rates?");
        assert!(fallback.contains(&ToolInvocation::GetInterestRates {
            location: "United States".into()
        }));
    }

    #[test]
    fn test_property_details_needs_an_id() {
        let with_id = route("show me details about property prop_001");
        assert!(with_id.contains(&ToolInvocation::GetPropertyDetails {
            property_id: "prop_001".into()
        }));

        let without_id = route("tell me more details please");
        assert!(!without_id
            .iter()
            .any(|i| matches!(i, ToolInvocation::GetPropertyDetails { .. })));
    }

    #[test]
    fn test_extract_numbers_handles_separators() {
        let numbers = extract_numbers("price 1,250,000 with 8.75 rate");
        assert_eq!(numbers, vec![dec!(1250000), dec!(8.75)]);
    }

    #[test]
    fn test_saved_properties_route() {
        let routed = route("show my saved properties");
        assert!(routed.contains(&ToolInvocation::GetUserSavedProperties));
    }
}
