//! Indicative mortgage interest rates by location.
//!
//! A deterministic estimate: national base rate plus a per-state adjustment
//! table. Stands in for a live rate feed; figures are indicative only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, RatePercent};
use crate::RealtyFinanceResult;

/// National base rate for a conventional 30-year loan, percent.
const BASE_RATE: Decimal = dec!(7.2);

/// Per-location adjustments in percentage points, matched against
/// whitespace-split tokens of the lowercased location string.
const LOCATION_ADJUSTMENTS: &[(&str, Decimal)] = &[
    ("california", dec!(0.1)),
    ("ca", dec!(0.1)),
    ("texas", dec!(-0.1)),
    ("tx", dec!(-0.1)),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    #[default]
    Conventional,
    Fha,
    Va,
    Jumbo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateQuery {
    pub location: String,
    #[serde(default)]
    pub loan_type: LoanType,
}

/// One historical rate observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateObservation {
    pub date: NaiveDate,
    pub rate_percent: RatePercent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateEstimate {
    pub location: String,
    pub loan_type: LoanType,
    pub current_rate_percent: RatePercent,
    pub rate_trend: String,
    pub last_updated: NaiveDate,
    pub rate_history: Vec<RateObservation>,
}

/// Estimate the prevailing rate for a location.
pub fn estimate_rates(query: &RateQuery) -> RealtyFinanceResult<ComputationOutput<RateEstimate>> {
    let start = Instant::now();

    let adjustment = location_adjustment(&query.location);
    let history = rate_history();
    let last_updated = history
        .last()
        .map(|obs| obs.date)
        .unwrap_or(NaiveDate::MIN);

    let output = RateEstimate {
        location: query.location.clone(),
        loan_type: query.loan_type.clone(),
        current_rate_percent: BASE_RATE + adjustment,
        rate_trend: "stable".to_string(),
        last_updated,
        rate_history: history,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "National base rate with location adjustment",
        query,
        Vec::new(),
        elapsed,
        output,
    ))
}

fn location_adjustment(location: &str) -> Decimal {
    let lowered = location.to_lowercase();
    for token in lowered.split_whitespace().map(|t| t.trim_matches(',')) {
        for (name, adjustment) in LOCATION_ADJUSTMENTS {
            if token == *name {
                return *adjustment;
            }
        }
    }
    Decimal::ZERO
}

fn rate_history() -> Vec<RateObservation> {
    const POINTS: &[(i32, u32, u32, Decimal)] = &[
        (2024, 1, 1, dec!(6.8)),
        (2024, 2, 1, dec!(7.0)),
        (2024, 3, 1, dec!(7.2)),
    ];

    POINTS
        .iter()
        .filter_map(|&(y, m, d, rate)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| RateObservation {
                date,
                rate_percent: rate,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_base_rate_for_unknown_location() {
        let query = RateQuery {
            location: "Denver".into(),
            loan_type: LoanType::Conventional,
        };
        let result = estimate_rates(&query).unwrap();
        assert_eq!(result.result.current_rate_percent, dec!(7.2));
    }

    #[test]
    fn test_state_adjustments() {
        let ca = RateQuery {
            location: "San Diego, California".into(),
            loan_type: LoanType::Conventional,
        };
        assert_eq!(
            estimate_rates(&ca).unwrap().result.current_rate_percent,
            dec!(7.3)
        );

        let tx = RateQuery {
            location: "Austin, TX".into(),
            loan_type: LoanType::Conventional,
        };
        assert_eq!(
            estimate_rates(&tx).unwrap().result.current_rate_percent,
            dec!(7.1)
        );
    }

    #[test]
    fn test_abbreviation_matches_whole_token_only() {
        // "Carolina" must not trip the "ca" adjustment
        let query = RateQuery {
            location: "North Carolina".into(),
            loan_type: LoanType::Conventional,
        };
        assert_eq!(
            estimate_rates(&query).unwrap().result.current_rate_percent,
            dec!(7.2)
        );
    }

    #[test]
    fn test_history_is_chronological() {
        let query = RateQuery {
            location: "anywhere".into(),
            loan_type: LoanType::Jumbo,
        };
        let result = estimate_rates(&query).unwrap();
        let history = &result.result.rate_history;
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(result.result.last_updated, history[2].date);
    }
}
