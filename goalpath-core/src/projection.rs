//! Savings projection toward a purchase goal.
//!
//! Two scenarios are computed for every request:
//!   - baseline: current income minus current average monthly spend
//!   - adjusted: same, after a flat percentage cut on every category that is
//!     not protected
//!
//! Each scenario either yields a timeline or an "infeasible" outcome. An
//! infeasible scenario is a normal result, not an error.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::goal::GoalRequest;

pub const NO_SAVINGS_WITHOUT_CUTS: &str = "No savings possible without cuts—see adjusted scenario.";
pub const NO_SAVINGS_WITH_CUTS: &str =
    "No savings possible even with cuts—reduce expenses further or increase income!";

/// Which categories may be cut, and by how much.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPolicy {
    /// Exact, case-sensitive category labels that are never cut
    pub protected: Vec<String>,
    /// Flat cut applied to every other category, in percent
    pub percentage: u32,
}

impl Default for CutPolicy {
    fn default() -> Self {
        Self {
            protected: vec!["Rent".to_string(), "Education".to_string()],
            percentage: 10,
        }
    }
}

impl CutPolicy {
    pub fn is_protected(&self, category: &str) -> bool {
        self.protected.iter().any(|p| p == category)
    }

    fn rate(&self) -> f64 {
        self.percentage as f64 / 100.0
    }
}

/// A proposed reduction for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub percentage: u32,
    /// Monthly amount removed, rounded to cents
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BaselineScenario {
    Feasible {
        months: f64,
        years: f64,
        monthly_savings: f64,
    },
    Infeasible,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedPlan {
    pub adjusted_months: f64,
    pub adjusted_years: f64,
    pub adjusted_monthly_savings: f64,
    pub cuts: BTreeMap<String, Cut>,
    pub total_cut_amount: f64,
    /// Baseline average monthly spend, for comparison with the adjusted plan
    pub monthly_expenses: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdjustedScenario {
    Feasible(AdjustedPlan),
    Infeasible,
}

/// Outcome of both scenarios.
///
/// Serializes to a single flat object: the baseline keys (or `error`)
/// merged with the adjusted keys (or `error`). When both scenarios are
/// infeasible the adjusted message wins the `error` key.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionResult {
    pub baseline: BaselineScenario,
    pub adjusted: AdjustedScenario,
}

impl ProjectionResult {
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();

        match &self.baseline {
            BaselineScenario::Feasible {
                months,
                years,
                monthly_savings,
            } => {
                out.insert("months".into(), json!(months));
                out.insert("years".into(), json!(years));
                out.insert("monthly_savings".into(), json!(monthly_savings));
                out.insert("cuts".into(), json!({}));
            }
            BaselineScenario::Infeasible => {
                out.insert("error".into(), json!(NO_SAVINGS_WITHOUT_CUTS));
            }
        }

        match &self.adjusted {
            AdjustedScenario::Feasible(plan) => {
                out.insert("adjusted_months".into(), json!(plan.adjusted_months));
                out.insert("adjusted_years".into(), json!(plan.adjusted_years));
                out.insert(
                    "adjusted_monthly_savings".into(),
                    json!(plan.adjusted_monthly_savings),
                );
                out.insert("cuts".into(), json!(plan.cuts));
                out.insert("total_cut_amount".into(), json!(plan.total_cut_amount));
                out.insert("monthly_expenses".into(), json!(plan.monthly_expenses));
            }
            AdjustedScenario::Infeasible => {
                out.insert("error".into(), json!(NO_SAVINGS_WITH_CUTS));
            }
        }

        Value::Object(out)
    }
}

impl Serialize for ProjectionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Project a goal with the default cut policy (Rent/Education protected, 10%).
pub fn project(request: &GoalRequest) -> ProjectionResult {
    project_with_policy(request, &CutPolicy::default())
}

pub fn project_with_policy(request: &GoalRequest, policy: &CutPolicy) -> ProjectionResult {
    info!(
        total_expenses = request.total_expenses,
        monthly_income = request.monthly_income,
        goal_cost = request.goal_cost,
        goal_type = %request.goal_type,
        "calculating savings"
    );

    // No filter means the whole total is treated as one month.
    let num_months = request.filtered_months.len().max(1) as f64;
    let monthly_expenses = request.total_expenses / num_months;
    let monthly_savings = request.monthly_income - monthly_expenses;
    info!(num_months, monthly_expenses, monthly_savings, "baseline averages");

    let baseline = if monthly_savings <= 0.0 {
        BaselineScenario::Infeasible
    } else {
        let months = request.goal_cost / monthly_savings;
        BaselineScenario::Feasible {
            months: round_dp(months, 1),
            years: round_dp(months / 12.0, 1),
            monthly_savings: round_dp(monthly_savings, 2),
        }
    };

    let filtered_total = if request.filtered_months.is_empty() {
        request.total_expenses
    } else {
        request.filtered_months.values().sum()
    };
    let monthly_filtered = filtered_total / num_months;
    info!(filtered_total, monthly_filtered, "filtered window");

    let (cuts, total_cut_amount) = plan_cuts(request, policy, monthly_filtered);

    let adjusted_expenses = monthly_filtered - total_cut_amount;
    let adjusted_savings = request.monthly_income - adjusted_expenses;

    let adjusted = if adjusted_savings > 0.0 {
        let adjusted_months = request.goal_cost / adjusted_savings;
        info!(adjusted_months, adjusted_savings, total_cut_amount, "adjusted scenario");
        AdjustedScenario::Feasible(AdjustedPlan {
            adjusted_months: round_dp(adjusted_months, 1),
            adjusted_years: round_dp(adjusted_months / 12.0, 1),
            adjusted_monthly_savings: round_dp(adjusted_savings, 2),
            cuts,
            total_cut_amount: round_dp(total_cut_amount, 2),
            monthly_expenses: round_dp(monthly_expenses, 2),
        })
    } else {
        warn!(adjusted_savings, "adjusted savings still not positive after cuts");
        AdjustedScenario::Infeasible
    };

    ProjectionResult { baseline, adjusted }
}

/// Per-category cuts and their unrounded monthly sum.
///
/// A category's share is taken against the unfiltered `total_expenses`, then
/// applied to the filtered monthly spend.
fn plan_cuts(
    request: &GoalRequest,
    policy: &CutPolicy,
    monthly_filtered: f64,
) -> (BTreeMap<String, Cut>, f64) {
    let mut cuts = BTreeMap::new();
    let mut total_cut_amount = 0.0;

    if request.total_expenses == 0.0 {
        warn!("total_expenses is zero; skipping category cuts");
        return (cuts, total_cut_amount);
    }

    for (category, amount) in &request.category_totals {
        if policy.is_protected(category) {
            continue;
        }
        let type_proportion = amount / request.total_expenses;
        let type_in_filtered = monthly_filtered * type_proportion;
        let cut_amount = type_in_filtered * policy.rate();
        total_cut_amount += cut_amount;
        debug!(category = %category, percentage = policy.percentage, cut_amount, "cut applied");
        cuts.insert(
            category.clone(),
            Cut {
                percentage: policy.percentage,
                amount: round_dp(cut_amount, 2),
            },
        );
    }

    (cuts, total_cut_amount)
}

/// Round to `places` decimals, ties to even on the exact binary value.
fn round_dp(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request(total_expenses: f64, monthly_income: f64) -> GoalRequest {
        GoalRequest::new(total_expenses, monthly_income, "x", 12000.0)
    }

    #[test]
    fn test_no_filter_no_categories() {
        let res = project(&base_request(5000.0, 6000.0));

        assert_eq!(
            res.baseline,
            BaselineScenario::Feasible {
                months: 12.0,
                years: 1.0,
                monthly_savings: 1000.0
            }
        );
        match res.adjusted {
            AdjustedScenario::Feasible(plan) => {
                assert_eq!(plan.adjusted_months, 12.0);
                assert_eq!(plan.adjusted_years, 1.0);
                assert_eq!(plan.adjusted_monthly_savings, 1000.0);
                assert_eq!(plan.total_cut_amount, 0.0);
                assert_eq!(plan.monthly_expenses, 5000.0);
                assert!(plan.cuts.is_empty());
            }
            AdjustedScenario::Infeasible => panic!("expected adjusted plan"),
        }
    }

    #[test]
    fn test_baseline_infeasible_both_fail() {
        let res = project(&base_request(3000.0, 2000.0));
        assert_eq!(res.baseline, BaselineScenario::Infeasible);
        assert_eq!(res.adjusted, AdjustedScenario::Infeasible);

        let v = res.to_json();
        assert_eq!(v["error"], NO_SAVINGS_WITH_CUTS);
        assert!(v.get("months").is_none());
    }

    #[test]
    fn test_adjusted_computed_when_baseline_fails() {
        let req = base_request(3000.0, 2900.0)
            .with_category_totals(BTreeMap::from([("Food".to_string(), 3000.0)]));
        let res = project(&req);

        assert_eq!(res.baseline, BaselineScenario::Infeasible);
        let AdjustedScenario::Feasible(plan) = &res.adjusted else {
            panic!("expected adjusted plan");
        };
        assert_eq!(plan.total_cut_amount, 300.0);
        assert_eq!(plan.adjusted_monthly_savings, 200.0);
        assert_eq!(plan.adjusted_months, 60.0);
        assert_eq!(plan.adjusted_years, 5.0);

        let v = res.to_json();
        assert_eq!(v["error"], NO_SAVINGS_WITHOUT_CUTS);
        assert_eq!(v["adjusted_months"], 60.0);
        assert_eq!(v["cuts"]["Food"]["percentage"], 10);
    }

    #[test]
    fn test_break_even_income_is_infeasible() {
        let res = project(&base_request(4000.0, 4000.0));
        assert_eq!(res.baseline, BaselineScenario::Infeasible);
    }

    #[test]
    fn test_protected_categories_never_cut() {
        let req = base_request(2000.0, 5000.0).with_category_totals(BTreeMap::from([
            ("Rent".to_string(), 1000.0),
            ("Education".to_string(), 500.0),
            ("Food".to_string(), 400.0),
            ("rent".to_string(), 100.0),
        ]));
        let AdjustedScenario::Feasible(plan) = project(&req).adjusted else {
            panic!("expected adjusted plan");
        };

        assert!(!plan.cuts.contains_key("Rent"));
        assert!(!plan.cuts.contains_key("Education"));
        // Matching is exact, so lowercase "rent" is cut.
        assert_eq!(plan.cuts["rent"].amount, 10.0);
        assert_eq!(plan.cuts["Food"].amount, 40.0);
        assert_eq!(plan.total_cut_amount, 50.0);
    }

    #[test]
    fn test_filtered_window_mixes_denominators() {
        // Two selected months worth 600 total; Food is half of the 2000 overall.
        let req = GoalRequest::new(2000.0, 1000.0, "bike", 1500.0)
            .with_category_totals(BTreeMap::from([("Food".to_string(), 1000.0)]))
            .with_filtered_months(BTreeMap::from([
                ("2024-01".to_string(), 200.0),
                ("2024-02".to_string(), 400.0),
            ]));
        let res = project(&req);

        // monthly_expenses = 2000 / 2 = 1000 -> no baseline savings
        assert_eq!(res.baseline, BaselineScenario::Infeasible);

        // monthly_filtered = 300, Food share 0.5 -> 150, cut 15
        let AdjustedScenario::Feasible(plan) = res.adjusted else {
            panic!("expected adjusted plan");
        };
        assert_eq!(plan.cuts["Food"].amount, 15.0);
        assert_eq!(plan.total_cut_amount, 15.0);
        assert_eq!(plan.adjusted_monthly_savings, 715.0);
        assert_eq!(plan.monthly_expenses, 1000.0);
        assert_eq!(plan.adjusted_months, 2.1);
    }

    #[test]
    fn test_zero_total_skips_cuts() {
        let req = base_request(0.0, 1000.0)
            .with_category_totals(BTreeMap::from([("Food".to_string(), 50.0)]));
        let AdjustedScenario::Feasible(plan) = project(&req).adjusted else {
            panic!("expected adjusted plan");
        };
        assert!(plan.cuts.is_empty());
        assert_eq!(plan.total_cut_amount, 0.0);
        assert_eq!(plan.adjusted_months, 12.0);
    }

    #[test]
    fn test_custom_policy() {
        let policy = CutPolicy {
            protected: vec!["Food".to_string()],
            percentage: 20,
        };
        let req = base_request(1000.0, 2000.0).with_category_totals(BTreeMap::from([
            ("Food".to_string(), 500.0),
            ("Rent".to_string(), 500.0),
        ]));
        let AdjustedScenario::Feasible(plan) = project_with_policy(&req, &policy).adjusted else {
            panic!("expected adjusted plan");
        };
        assert_eq!(plan.cuts.len(), 1);
        assert_eq!(plan.cuts["Rent"], Cut { percentage: 20, amount: 100.0 });
    }

    #[test]
    fn test_feasible_json_shape() {
        let v = serde_json::to_value(project(&base_request(5000.0, 6000.0))).unwrap();
        assert_eq!(v["months"], 12.0);
        assert_eq!(v["years"], 1.0);
        assert_eq!(v["monthly_savings"], 1000.0);
        assert_eq!(v["adjusted_months"], 12.0);
        assert_eq!(v["total_cut_amount"], 0.0);
        assert_eq!(v["monthly_expenses"], 5000.0);
        assert_eq!(v["cuts"], serde_json::json!({}));
        assert!(v.get("error").is_none());
    }

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(2.142857, 1), 2.1);
        assert_eq!(round_dp(33.3333, 2), 33.33);
        assert_eq!(round_dp(12.0, 1), 12.0);
    }
}
