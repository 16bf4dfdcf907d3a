//! Derived financial and yield metrics for a project
//!
//! Pure functions over the cost and harvest records the persistence layer
//! loads for one project. Every function is total: empty input, missing
//! optional fields, and zero denominators all produce zeros rather than
//! errors, so presentation code never sees a division failure.
//!
//! Percentages are returned at full precision and are NOT clamped here;
//! progress bars clamp with [`clamp_progress`] at display time.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Cost, CostCategory, Harvest, Project};

/// Sum of all cost amounts
pub fn total_cost(costs: &[Cost]) -> Decimal {
    costs.iter().map(|cost| cost.amount).sum()
}

/// Summed cost amounts keyed by category.
///
/// Only categories actually present in the input appear; absent categories
/// are omitted rather than zero-filled. Unrecognized category strings are
/// keys like any other.
pub fn cost_breakdown(costs: &[Cost]) -> BTreeMap<CostCategory, Decimal> {
    let mut breakdown = BTreeMap::new();
    for cost in costs {
        *breakdown.entry(cost.category.clone()).or_insert(Decimal::ZERO) += cost.amount;
    }
    breakdown
}

/// Sum of harvested quantities
pub fn total_harvested(harvests: &[Harvest]) -> Decimal {
    harvests.iter().map(|harvest| harvest.quantity).sum()
}

/// Sum of `quantity * unit_price` over all harvests.
///
/// An unsold harvest (no unit price) contributes zero revenue but still
/// counts toward [`total_harvested`].
pub fn total_revenue(harvests: &[Harvest]) -> Decimal {
    harvests
        .iter()
        .map(|harvest| harvest.quantity * harvest.unit_price.unwrap_or(Decimal::ZERO))
        .sum()
}

/// Revenue minus cost; negative for a loss
pub fn net_profit(revenue: Decimal, cost: Decimal) -> Decimal {
    revenue - cost
}

/// Profit divided by harvested quantity, zero when nothing was harvested
pub fn profit_per_unit(profit: Decimal, total_harvested: Decimal) -> Decimal {
    if total_harvested > Decimal::ZERO {
        profit / total_harvested
    } else {
        Decimal::ZERO
    }
}

/// Cost divided by harvested quantity, zero when nothing was harvested
pub fn cost_per_unit(total_cost: Decimal, total_harvested: Decimal) -> Decimal {
    if total_harvested > Decimal::ZERO {
        total_cost / total_harvested
    } else {
        Decimal::ZERO
    }
}

/// Harvested quantity relative to the expected yield, as a percentage.
///
/// Deliberately unclamped: a project that out-produces its target reports
/// more than 100.
pub fn yield_percentage(total_harvested: Decimal, expected_yield: Decimal) -> Decimal {
    if expected_yield > Decimal::ZERO {
        total_harvested / expected_yield * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Profit relative to revenue, as a percentage; zero without revenue
pub fn profit_margin(profit: Decimal, revenue: Decimal) -> Decimal {
    if revenue > Decimal::ZERO {
        profit / revenue * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Display clamp for progress bars, bounded to [0, 100]
pub fn clamp_progress(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// The full metric bundle for one project, recomputed on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectMetrics {
    pub total_cost: Decimal,
    pub total_harvested: Decimal,
    pub total_revenue: Decimal,
    pub net_profit: Decimal,
    pub profit_margin_percent: Decimal,
    pub profit_per_unit: Decimal,
    pub cost_per_unit: Decimal,
    pub yield_percent: Decimal,
    pub cost_breakdown: BTreeMap<CostCategory, Decimal>,
}

impl ProjectMetrics {
    /// Compute every derived metric for a project from its records.
    ///
    /// The records are read-only inputs; nothing is persisted.
    pub fn compute(project: &Project, costs: &[Cost], harvests: &[Harvest]) -> Self {
        let total_cost = total_cost(costs);
        let total_harvested = total_harvested(harvests);
        let total_revenue = total_revenue(harvests);
        let net_profit = net_profit(total_revenue, total_cost);

        Self {
            profit_margin_percent: profit_margin(net_profit, total_revenue),
            profit_per_unit: profit_per_unit(net_profit, total_harvested),
            cost_per_unit: cost_per_unit(total_cost, total_harvested),
            yield_percent: yield_percentage(total_harvested, project.expected_yield),
            cost_breakdown: cost_breakdown(costs),
            total_cost,
            total_harvested,
            total_revenue,
            net_profit,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::models::{ProjectStatus, QualityGrade};

    fn cost(amount: i64, category: &str) -> Cost {
        Cost {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            name: format!("{} purchase", category),
            amount: Decimal::from(amount),
            category: CostCategory::from(category),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            description: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap(),
        }
    }

    fn harvest(quantity: i64, unit_price: Option<i64>) -> Harvest {
        Harvest {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            quantity: Decimal::from(quantity),
            quality: QualityGrade::Good,
            unit_price: unit_price.map(Decimal::from),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 8, 1, 8, 0, 0).unwrap(),
        }
    }

    fn project(expected_yield: i64) -> Project {
        Project {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Winter Wheat".to_string(),
            description: None,
            status: ProjectStatus::Active,
            land_area_acres: Decimal::from(12),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            expected_harvest_date: NaiveDate::from_ymd_opt(2025, 9, 1),
            target_sell_price: Decimal::from(5),
            expected_yield: Decimal::from(expected_yield),
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_totals_and_breakdown() {
        let costs = vec![cost(100, "seeds"), cost(50, "labor")];

        assert_eq!(total_cost(&costs), Decimal::from(150));

        let breakdown = cost_breakdown(&costs);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[&CostCategory::Seeds], Decimal::from(100));
        assert_eq!(breakdown[&CostCategory::Labor], Decimal::from(50));
    }

    #[test]
    fn test_empty_inputs_produce_zeros() {
        assert_eq!(total_cost(&[]), Decimal::ZERO);
        assert_eq!(total_harvested(&[]), Decimal::ZERO);
        assert_eq!(total_revenue(&[]), Decimal::ZERO);
        assert!(cost_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_breakdown_omits_absent_categories() {
        let breakdown = cost_breakdown(&[cost(80, "fertilizer")]);
        assert_eq!(breakdown.len(), 1);
        assert!(!breakdown.contains_key(&CostCategory::Seeds));
    }

    #[test]
    fn test_breakdown_keeps_unrecognized_category() {
        let breakdown = cost_breakdown(&[cost(40, "irrigation"), cost(10, "irrigation")]);
        assert_eq!(
            breakdown[&CostCategory::Custom("irrigation".to_string())],
            Decimal::from(50)
        );
    }

    #[test]
    fn test_loss_case() {
        let harvests = vec![harvest(10, Some(5))];
        let revenue = total_revenue(&harvests);
        assert_eq!(revenue, Decimal::from(50));

        let profit = net_profit(revenue, Decimal::from(80));
        assert_eq!(profit, Decimal::from(-30));
        assert_eq!(profit_per_unit(profit, Decimal::from(10)), Decimal::from(-3));
    }

    #[test]
    fn test_unsold_harvest_counts_toward_quantity_only() {
        let harvests = vec![harvest(20, None)];
        assert_eq!(total_harvested(&harvests), Decimal::from(20));
        assert_eq!(total_revenue(&harvests), Decimal::ZERO);
    }

    #[test]
    fn test_per_unit_guards_on_zero_harvest() {
        assert_eq!(profit_per_unit(Decimal::from(500), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(cost_per_unit(Decimal::from(500), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_yield_percentage_unclamped() {
        let pct = yield_percentage(Decimal::from(150), Decimal::from(100));
        assert_eq!(pct, Decimal::from(150));
        assert_eq!(clamp_progress(pct), Decimal::from(100));
    }

    #[test]
    fn test_yield_percentage_zero_expected() {
        assert_eq!(yield_percentage(Decimal::from(42), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_profit_margin_guard() {
        assert_eq!(profit_margin(Decimal::from(-30), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(
            profit_margin(Decimal::from(25), Decimal::from(100)),
            Decimal::from(25)
        );
    }

    #[test]
    fn test_clamp_progress_bounds() {
        assert_eq!(clamp_progress(Decimal::from(-5)), Decimal::ZERO);
        assert_eq!(clamp_progress(Decimal::from(60)), Decimal::from(60));
        assert_eq!(clamp_progress(Decimal::from(130)), Decimal::from(100));
    }

    #[test]
    fn test_bundle_is_consistent() {
        let project = project(100);
        let costs = vec![cost(100, "seeds"), cost(50, "labor")];
        let harvests = vec![harvest(10, Some(20)), harvest(5, None)];

        let metrics = ProjectMetrics::compute(&project, &costs, &harvests);

        assert_eq!(metrics.total_cost, Decimal::from(150));
        assert_eq!(metrics.total_harvested, Decimal::from(15));
        assert_eq!(metrics.total_revenue, Decimal::from(200));
        assert_eq!(metrics.net_profit, Decimal::from(50));
        assert_eq!(metrics.profit_margin_percent, Decimal::from(25));
        assert_eq!(metrics.yield_percent, Decimal::from(15));
        assert_eq!(metrics.cost_per_unit, Decimal::from(10));

        let breakdown_sum: Decimal = metrics.cost_breakdown.values().copied().sum();
        assert_eq!(breakdown_sum, metrics.total_cost);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let project = project(100);
        let costs = vec![cost(75, "equipment")];
        let harvests = vec![harvest(8, Some(12))];

        let first = ProjectMetrics::compute(&project, &costs, &harvests);
        let second = ProjectMetrics::compute(&project, &costs, &harvests);
        assert_eq!(first, second);
    }
}
