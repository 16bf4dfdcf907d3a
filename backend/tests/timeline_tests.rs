//! Timeline layout property-based and unit tests
//!
//! - the extent always covers every project's start and effective end
//! - bar positions stay within the axis for the projects that built them
//! - the degenerate single-day extent yields a full-width bar
//! - open-ended projects get the 30-day default run

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::models::{Project, ProjectStatus};
use shared::timeline::{
    bar_position, effective_end_date, TimelineExtent, OPEN_ENDED_RUN_DAYS,
};

// ============================================================================
// Record Builders
// ============================================================================

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn make_project(start_offset_days: i64, duration_days: Option<i64>) -> Project {
    let start_date = base_date() + Duration::days(start_offset_days);
    Project {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: "Field".to_string(),
        description: None,
        status: ProjectStatus::Planning,
        land_area_acres: Decimal::from(5),
        start_date,
        expected_harvest_date: duration_days.map(|d| start_date + Duration::days(d)),
        target_sell_price: Decimal::from(2),
        expected_yield: Decimal::from(50),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn project_strategy() -> impl Strategy<Value = Project> {
    (0..=720i64, prop::option::of(0..=400i64))
        .prop_map(|(start_offset, duration)| make_project(start_offset, duration))
}

fn projects_strategy() -> impl Strategy<Value = Vec<Project>> {
    prop::collection::vec(project_strategy(), 1..10)
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// The extent covers every project's start and effective end
    #[test]
    fn test_extent_covers_all_projects(projects in projects_strategy()) {
        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();

        for project in &projects {
            prop_assert!(extent.min_date <= project.start_date);
            prop_assert!(extent.max_date >= effective_end_date(project, today()));
        }
    }

    /// Bars built from the same projects as the extent stay on the axis
    #[test]
    fn test_bars_stay_within_axis(projects in projects_strategy()) {
        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();

        // Allow for rounding in the two divisions
        let tolerance = Decimal::new(1, 10);

        for project in &projects {
            let bar = bar_position(project, &extent, today());
            prop_assert!(bar.offset_percent >= Decimal::ZERO);
            prop_assert!(bar.width_percent >= Decimal::ZERO);
            prop_assert!(
                bar.offset_percent + bar.width_percent <= Decimal::ONE_HUNDRED + tolerance,
                "bar exceeds axis: offset {} width {}",
                bar.offset_percent,
                bar.width_percent
            );
        }
    }

    /// Layout is a pure function: recomputation matches
    #[test]
    fn test_layout_deterministic(projects in projects_strategy()) {
        let extent_a = TimelineExtent::from_projects(&projects, today());
        let extent_b = TimelineExtent::from_projects(&projects, today());
        prop_assert_eq!(extent_a, extent_b);

        if let Some(extent) = extent_a {
            for project in &projects {
                let first = bar_position(project, &extent, today());
                let second = bar_position(project, &extent, today());
                prop_assert_eq!(first, second);
            }
        }
    }

    /// An open-ended project always ends 30 days after the computation date
    #[test]
    fn test_open_ended_default_run(start_offset in 0..=720i64) {
        let project = make_project(start_offset, None);
        let end = effective_end_date(&project, today());
        prop_assert_eq!(end, today() + Duration::days(OPEN_ENDED_RUN_DAYS));
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod extent_tests {
    use super::*;

    #[test]
    fn test_empty_projects_have_no_extent() {
        assert_eq!(TimelineExtent::from_projects(&[], today()), None);
    }

    #[test]
    fn test_extent_min_and_max() {
        let projects = vec![
            make_project(0, Some(90)),
            make_project(30, Some(200)),
            make_project(10, Some(40)),
        ];

        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();
        assert_eq!(extent.min_date, base_date());
        assert_eq!(extent.max_date, base_date() + Duration::days(230));
    }
}

#[cfg(test)]
mod bar_tests {
    use super::*;

    #[test]
    fn test_degenerate_extent_full_width() {
        let projects = vec![make_project(100, Some(0))];
        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();
        assert_eq!(extent.min_date, extent.max_date);

        let bar = bar_position(&projects[0], &extent, today());
        assert_eq!(bar.offset_percent, Decimal::ZERO);
        assert_eq!(bar.width_percent, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_quarter_offset_half_width() {
        // axis: day 0 to day 100; project: day 25 to day 75
        let projects = vec![
            make_project(0, Some(100)),
            make_project(25, Some(50)),
        ];
        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();

        let bar = bar_position(&projects[1], &extent, today());
        assert_eq!(bar.offset_percent, Decimal::from(25));
        assert_eq!(bar.width_percent, Decimal::from(50));
    }

    #[test]
    fn test_full_span_project_fills_axis() {
        let projects = vec![make_project(0, Some(180))];
        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();

        let bar = bar_position(&projects[0], &extent, today());
        assert_eq!(bar.offset_percent, Decimal::ZERO);
        assert_eq!(bar.width_percent, Decimal::ONE_HUNDRED);
    }
}
