//! Savings goal requests and their validation

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::InputValidationError;
use crate::summary::ExpenseSummary;

/// Parameters for a savings projection.
///
/// `filtered_months` only contributes its key count and value sum; it scopes
/// the projection window to the months the caller selected.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalRequest {
    pub total_expenses: f64,
    pub monthly_income: f64,
    /// Informational label (e.g. "car", "house")
    pub goal_type: String,
    pub goal_cost: f64,
    pub category_totals: BTreeMap<String, f64>,
    pub filtered_months: BTreeMap<String, f64>,
}

impl GoalRequest {
    pub fn new(
        total_expenses: f64,
        monthly_income: f64,
        goal_type: impl Into<String>,
        goal_cost: f64,
    ) -> Self {
        Self {
            total_expenses,
            monthly_income,
            goal_type: goal_type.into(),
            goal_cost,
            category_totals: BTreeMap::new(),
            filtered_months: BTreeMap::new(),
        }
    }

    pub fn with_category_totals(mut self, totals: BTreeMap<String, f64>) -> Self {
        self.category_totals = totals;
        self
    }

    pub fn with_filtered_months(mut self, months: BTreeMap<String, f64>) -> Self {
        self.filtered_months = months;
        self
    }

    /// Build a request from an ingested summary.
    ///
    /// With a month selection, `total_expenses` is the sum of the selected
    /// months; without one it is the summary total. Category totals are always
    /// the unfiltered ones.
    pub fn from_summary(
        summary: &ExpenseSummary,
        monthly_income: f64,
        goal_type: impl Into<String>,
        goal_cost: f64,
        months: Option<&[String]>,
    ) -> Self {
        let filtered = months.map(|m| summary.select_months(m)).unwrap_or_default();
        let total_expenses = if filtered.is_empty() {
            summary.total
        } else {
            filtered.values().sum()
        };

        Self::new(total_expenses, monthly_income, goal_type, goal_cost)
            .with_category_totals(summary.category_totals.clone())
            .with_filtered_months(filtered)
    }

    /// Validate a JSON request body.
    ///
    /// `total_expenses`, `monthly_income`, `goal_type` and `goal_cost` are
    /// required. Numbers may arrive as JSON numbers or numeric strings.
    /// `type_summary` and `filtered_time_series` default to empty mappings.
    pub fn from_json(value: &Value) -> Result<Self, InputValidationError> {
        let obj = value.as_object().ok_or(InputValidationError::NotAnObject)?;

        let total_expenses = required_number(obj, "total_expenses")?;
        let monthly_income = required_number(obj, "monthly_income")?;
        let goal_type = match obj.get("goal_type") {
            None => return Err(InputValidationError::MissingField("goal_type")),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        let goal_cost = required_number(obj, "goal_cost")?;

        Ok(Self {
            total_expenses,
            monthly_income,
            goal_type,
            goal_cost,
            category_totals: optional_mapping(obj, "type_summary")?,
            filtered_months: optional_mapping(obj, "filtered_time_series")?,
        })
    }
}

fn required_number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, InputValidationError> {
    let value = obj
        .get(field)
        .ok_or(InputValidationError::MissingField(field))?;
    as_number(value).ok_or_else(|| InputValidationError::NotNumeric {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn optional_mapping(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<BTreeMap<String, f64>, InputValidationError> {
    let entries = match obj.get(field) {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(_) => return Err(InputValidationError::NotAMapping(field)),
    };

    entries
        .iter()
        .map(|(key, v)| {
            as_number(v)
                .map(|n| (key.clone(), n))
                .ok_or_else(|| InputValidationError::NotNumeric {
                    field: format!("{field}.{key}"),
                    value: v.to_string(),
                })
        })
        .collect()
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
