//! Aggregate view of an ingested statement

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Monthly and per-category totals produced by statement ingestion.
///
/// Serialized with the flat key names the presentation layer reads:
/// `time_series`, `type_summary`, `total`, `years`, `months`, `expense_types`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    /// "YYYY-MM" -> summed amount
    #[serde(rename = "time_series")]
    pub monthly_totals: BTreeMap<String, f64>,
    /// Category label -> summed amount
    #[serde(rename = "type_summary")]
    pub category_totals: BTreeMap<String, f64>,
    /// Sum of every record
    pub total: f64,
    /// Contiguous years from the earliest to the latest record, inclusive
    #[serde(rename = "years")]
    pub year_range: Vec<i32>,
    /// Distinct month labels in the order they were first seen
    #[serde(rename = "months")]
    pub months_present: Vec<String>,
    /// Distinct category labels, lexically sorted
    #[serde(rename = "expense_types")]
    pub categories: Vec<String>,
}

impl ExpenseSummary {
    /// True when the monthly and category breakdowns both add up to `total`.
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        let monthly: f64 = self.monthly_totals.values().sum();
        let by_category: f64 = self.category_totals.values().sum();
        (monthly - self.total).abs() <= tolerance && (by_category - self.total).abs() <= tolerance
    }

    /// Monthly totals restricted to `months`. Labels not present in the
    /// summary are ignored.
    pub fn select_months(&self, months: &[String]) -> BTreeMap<String, f64> {
        months
            .iter()
            .filter_map(|m| self.monthly_totals.get(m).map(|v| (m.clone(), *v)))
            .collect()
    }
}
