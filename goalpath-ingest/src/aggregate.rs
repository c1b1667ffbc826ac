//! Fold coerced records into an [`ExpenseSummary`].

use chrono::Datelike;
use goalpath_core::ExpenseSummary;
use std::collections::{BTreeMap, HashSet};

use crate::types::TransactionRecord;

/// Aggregate records by month and by category.
///
/// Returns `None` when there is nothing to aggregate; callers treat that as
/// "no data" rather than a failure.
pub fn summarize(records: &[TransactionRecord]) -> Option<ExpenseSummary> {
    let first = records.first()?;

    let mut monthly_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut months_present = Vec::new();
    let mut seen_months = HashSet::new();
    let mut total = 0.0;
    let (mut min_date, mut max_date) = (first.date, first.date);

    for record in records {
        let month = record.month_label();
        if seen_months.insert(month.clone()) {
            months_present.push(month.clone());
        }
        *monthly_totals.entry(month).or_default() += record.amount;
        *category_totals.entry(record.category.clone()).or_default() += record.amount;
        total += record.amount;

        min_date = min_date.min(record.date);
        max_date = max_date.max(record.date);
    }

    let categories = category_totals.keys().cloned().collect();

    Some(ExpenseSummary {
        monthly_totals,
        category_totals,
        total,
        year_range: (min_date.year()..=max_date.year()).collect(),
        months_present,
        categories,
    })
}
