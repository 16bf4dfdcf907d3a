//! Aggregation engine property-based and unit tests
//!
//! Covers the derived-metric contract end to end:
//! - totals equal the sum of their records
//! - the category breakdown partitions the total exactly
//! - unsold harvests contribute quantity but no revenue
//! - zero denominators always produce zero, never a panic
//! - recomputation with the same inputs is bit-identical

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::metrics::{
    clamp_progress, cost_breakdown, cost_per_unit, net_profit, profit_margin, profit_per_unit,
    total_cost, total_harvested, total_revenue, yield_percentage, ProjectMetrics,
};
use shared::models::{Cost, CostCategory, Harvest, Project, ProjectStatus, QualityGrade};
use shared::validation::validate_cost_amount;

// ============================================================================
// Record Builders
// ============================================================================

fn make_cost(amount: Decimal, category: &str) -> Cost {
    Cost {
        id: Uuid::new_v4(),
        project_id: Uuid::new_v4(),
        name: format!("{} entry", category),
        amount,
        category: CostCategory::from(category),
        date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        description: None,
        created_at: Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
    }
}

fn make_harvest(quantity: Decimal, unit_price: Option<Decimal>) -> Harvest {
    Harvest {
        id: Uuid::new_v4(),
        project_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
        quantity,
        quality: QualityGrade::Good,
        unit_price,
        notes: None,
        created_at: Utc.with_ymd_and_hms(2025, 8, 15, 9, 0, 0).unwrap(),
    }
}

fn make_project(expected_yield: Decimal) -> Project {
    Project {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: "Test Field".to_string(),
        description: None,
        status: ProjectStatus::Active,
        land_area_acres: Decimal::from(10),
        start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        expected_harvest_date: NaiveDate::from_ymd_opt(2025, 10, 1),
        target_sell_price: Decimal::from(4),
        expected_yield,
        created_at: Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap(),
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Monetary amounts with two decimal places (0.00 to 10,000.00)
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Positive quantities with two decimal places (0.01 to 1,000.00)
fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1..=100_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Known and unknown category strings; unknown ones must aggregate too
fn category_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "seeds".to_string(),
        "fertilizer".to_string(),
        "labor".to_string(),
        "equipment".to_string(),
        "pesticides".to_string(),
        "other".to_string(),
        "irrigation".to_string(),
        "storage".to_string(),
    ])
}

fn cost_strategy() -> impl Strategy<Value = Cost> {
    (amount_strategy(), category_strategy())
        .prop_map(|(amount, category)| make_cost(amount, &category))
}

fn costs_strategy() -> impl Strategy<Value = Vec<Cost>> {
    prop::collection::vec(cost_strategy(), 0..20)
}

fn harvest_strategy() -> impl Strategy<Value = Harvest> {
    (quantity_strategy(), prop::option::of(amount_strategy()))
        .prop_map(|(quantity, unit_price)| make_harvest(quantity, unit_price))
}

fn harvests_strategy() -> impl Strategy<Value = Vec<Harvest>> {
    prop::collection::vec(harvest_strategy(), 0..20)
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Total cost is exactly the sum of the amounts
    #[test]
    fn test_total_cost_is_sum(costs in costs_strategy()) {
        let expected: Decimal = costs.iter().map(|c| c.amount).sum();
        prop_assert_eq!(total_cost(&costs), expected);
    }

    /// The breakdown partitions the total: its values sum back to the total
    #[test]
    fn test_breakdown_partitions_total(costs in costs_strategy()) {
        let breakdown = cost_breakdown(&costs);
        let partition_sum: Decimal = breakdown.values().copied().sum();
        prop_assert_eq!(partition_sum, total_cost(&costs));
    }

    /// Breakdown keys are exactly the categories present in the input
    #[test]
    fn test_breakdown_keys_match_input(costs in costs_strategy()) {
        let breakdown = cost_breakdown(&costs);
        for cost in &costs {
            prop_assert!(breakdown.contains_key(&cost.category));
        }
        for key in breakdown.keys() {
            prop_assert!(costs.iter().any(|c| &c.category == key));
        }
    }

    /// Revenue is the sum of quantity * (price or 0)
    #[test]
    fn test_revenue_formula(harvests in harvests_strategy()) {
        let expected: Decimal = harvests
            .iter()
            .map(|h| h.quantity * h.unit_price.unwrap_or(Decimal::ZERO))
            .sum();
        prop_assert_eq!(total_revenue(&harvests), expected);
    }

    /// Unsold harvests count toward quantity but never revenue
    #[test]
    fn test_unsold_harvests_zero_revenue(quantities in prop::collection::vec(quantity_strategy(), 1..10)) {
        let harvests: Vec<Harvest> = quantities
            .iter()
            .map(|q| make_harvest(*q, None))
            .collect();

        let expected_quantity: Decimal = quantities.iter().copied().sum();
        prop_assert_eq!(total_harvested(&harvests), expected_quantity);
        prop_assert_eq!(total_revenue(&harvests), Decimal::ZERO);
    }

    /// Zero denominators produce zero, never a panic
    #[test]
    fn test_zero_denominator_guards(value in amount_strategy()) {
        prop_assert_eq!(profit_per_unit(value, Decimal::ZERO), Decimal::ZERO);
        prop_assert_eq!(cost_per_unit(value, Decimal::ZERO), Decimal::ZERO);
        prop_assert_eq!(yield_percentage(value, Decimal::ZERO), Decimal::ZERO);
        prop_assert_eq!(profit_margin(value, Decimal::ZERO), Decimal::ZERO);
    }

    /// The clamp stays inside [0, 100] and is identity within it
    #[test]
    fn test_clamp_bounds(n in -10_000..=20_000i64) {
        let value = Decimal::new(n, 2);
        let clamped = clamp_progress(value);
        prop_assert!(clamped >= Decimal::ZERO);
        prop_assert!(clamped <= Decimal::ONE_HUNDRED);
        if value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED {
            prop_assert_eq!(clamped, value);
        }
    }

    /// Recomputing the bundle with identical inputs is bit-identical
    #[test]
    fn test_compute_idempotent(
        costs in costs_strategy(),
        harvests in harvests_strategy(),
        expected_yield in amount_strategy()
    ) {
        let project = make_project(expected_yield);
        let first = ProjectMetrics::compute(&project, &costs, &harvests);
        let second = ProjectMetrics::compute(&project, &costs, &harvests);
        prop_assert_eq!(first, second);
    }

    /// Profit decomposes back into revenue minus cost
    #[test]
    fn test_profit_decomposition(
        costs in costs_strategy(),
        harvests in harvests_strategy()
    ) {
        let project = make_project(Decimal::from(100));
        let metrics = ProjectMetrics::compute(&project, &costs, &harvests);
        prop_assert_eq!(
            metrics.net_profit,
            metrics.total_revenue - metrics.total_cost
        );
    }
}

// ============================================================================
// Unit Tests: Scenario Coverage
// ============================================================================

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_basic_totals_and_breakdown() {
        let costs = vec![
            make_cost(Decimal::from(100), "seeds"),
            make_cost(Decimal::from(50), "labor"),
        ];

        assert_eq!(total_cost(&costs), Decimal::from(150));

        let breakdown = cost_breakdown(&costs);
        assert_eq!(breakdown[&CostCategory::Seeds], Decimal::from(100));
        assert_eq!(breakdown[&CostCategory::Labor], Decimal::from(50));
    }

    #[test]
    fn test_loss_case() {
        let harvests = vec![make_harvest(Decimal::from(10), Some(Decimal::from(5)))];
        let revenue = total_revenue(&harvests);
        let profit = net_profit(revenue, Decimal::from(80));

        assert_eq!(revenue, Decimal::from(50));
        assert_eq!(profit, Decimal::from(-30));
        assert_eq!(profit_per_unit(profit, Decimal::from(10)), Decimal::from(-3));
    }

    #[test]
    fn test_unsold_harvest() {
        let harvests = vec![make_harvest(Decimal::from(20), None)];
        assert_eq!(total_harvested(&harvests), Decimal::from(20));
        assert_eq!(total_revenue(&harvests), Decimal::ZERO);
    }

    #[test]
    fn test_yield_percentage_exceeds_100_unclamped() {
        let pct = yield_percentage(Decimal::from(150), Decimal::from(100));
        assert_eq!(pct, Decimal::from(150));
        // the display clamp is a separate concern
        assert_eq!(clamp_progress(pct), Decimal::from(100));
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(total_cost(&[]), Decimal::ZERO);
        assert_eq!(total_harvested(&[]), Decimal::ZERO);
        assert_eq!(total_revenue(&[]), Decimal::ZERO);
        assert!(cost_breakdown(&[]).is_empty());
    }
}

// ============================================================================
// Unit Tests: Permissive Categories
// ============================================================================

#[cfg(test)]
mod category_tests {
    use super::*;

    #[test]
    fn test_unrecognized_category_aggregates_under_literal_value() {
        let costs = vec![
            make_cost(Decimal::from(30), "drone-survey"),
            make_cost(Decimal::from(20), "drone-survey"),
        ];

        let breakdown = cost_breakdown(&costs);
        assert_eq!(
            breakdown[&CostCategory::Custom("drone-survey".to_string())],
            Decimal::from(50)
        );
    }

    #[test]
    fn test_known_and_unknown_categories_coexist() {
        let costs = vec![
            make_cost(Decimal::from(10), "seeds"),
            make_cost(Decimal::from(15), "consulting"),
        ];

        let breakdown = cost_breakdown(&costs);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(
            breakdown.values().copied().sum::<Decimal>(),
            Decimal::from(25)
        );
    }
}

// ============================================================================
// Unit Tests: Documented Deviation
// ============================================================================

#[cfg(test)]
mod deviation_tests {
    use super::*;

    /// The persistence seam rejects negative amounts even though the engine
    /// itself would sum them; the engine stays permissive, creation does not.
    #[test]
    fn test_negative_amount_rejected_at_creation() {
        assert!(validate_cost_amount(Decimal::from(-10)).is_err());
    }

    /// The engine itself still sums whatever it is handed
    #[test]
    fn test_engine_sums_negative_amounts_permissively() {
        let costs = vec![
            make_cost(Decimal::from(100), "seeds"),
            make_cost(Decimal::from(-40), "seeds"),
        ];
        assert_eq!(total_cost(&costs), Decimal::from(60));
    }
}
