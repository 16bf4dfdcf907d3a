//! Gantt-style timeline layout for project date ranges
//!
//! Maps each project's start/end dates onto a normalized horizontal axis
//! expressed in percentages. The computation date (`today`) is always an
//! explicit argument so the layout stays a pure function of its inputs.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Project;

/// Days an open-ended project is assumed to keep running past `today`
pub const OPEN_ENDED_RUN_DAYS: i64 = 30;

/// Effective end date of a project on the timeline.
///
/// A project without an expected harvest date is treated as ending
/// [`OPEN_ENDED_RUN_DAYS`] after the computation date.
pub fn effective_end_date(project: &Project, today: NaiveDate) -> NaiveDate {
    project
        .expected_harvest_date
        .unwrap_or_else(|| today + Duration::days(OPEN_ENDED_RUN_DAYS))
}

/// The horizontal extent spanned by a set of projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineExtent {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

impl TimelineExtent {
    /// Minimum start and maximum end across all projects; `None` when the
    /// slice is empty.
    pub fn from_projects(projects: &[Project], today: NaiveDate) -> Option<Self> {
        let mut dates = projects
            .iter()
            .flat_map(|p| [p.start_date, effective_end_date(p, today)]);

        let first = dates.next()?;
        let (min_date, max_date) =
            dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

        Some(Self { min_date, max_date })
    }

    fn span_days(&self) -> i64 {
        (self.max_date - self.min_date).num_days()
    }
}

/// Position of one project's bar within a timeline extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarPosition {
    pub offset_percent: Decimal,
    pub width_percent: Decimal,
}

/// Compute where a project's bar sits on the axis.
///
/// A zero-length extent (a single project starting and ending on the same
/// day) yields a full-width bar at the origin.
pub fn bar_position(project: &Project, extent: &TimelineExtent, today: NaiveDate) -> BarPosition {
    let span = extent.span_days();
    if span == 0 {
        return BarPosition {
            offset_percent: Decimal::ZERO,
            width_percent: Decimal::ONE_HUNDRED,
        };
    }

    let span = Decimal::from(span);
    let offset = Decimal::from((project.start_date - extent.min_date).num_days());
    let length =
        Decimal::from((effective_end_date(project, today) - project.start_date).num_days());

    BarPosition {
        offset_percent: offset / span * Decimal::ONE_HUNDRED,
        width_percent: length / span * Decimal::ONE_HUNDRED,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::models::ProjectStatus;

    fn project(start: (i32, u32, u32), end: Option<(i32, u32, u32)>) -> Project {
        Project {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Field".to_string(),
            description: None,
            status: ProjectStatus::Active,
            land_area_acres: Decimal::from(10),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            expected_harvest_date: end
                .map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            target_sell_price: Decimal::from(3),
            expected_yield: Decimal::from(100),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_extent_empty_input() {
        assert_eq!(TimelineExtent::from_projects(&[], today()), None);
    }

    #[test]
    fn test_extent_spans_all_projects() {
        let projects = vec![
            project((2025, 1, 1), Some((2025, 4, 1))),
            project((2025, 2, 1), Some((2025, 9, 1))),
        ];

        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();
        assert_eq!(extent.min_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(extent.max_date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn test_open_ended_project_runs_30_days_past_today() {
        let projects = vec![project((2025, 5, 1), None)];

        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();
        assert_eq!(extent.max_date, today() + Duration::days(OPEN_ENDED_RUN_DAYS));
    }

    #[test]
    fn test_bar_position_halfway() {
        let projects = vec![
            project((2025, 1, 1), Some((2025, 1, 11))),
            project((2025, 1, 6), Some((2025, 1, 11))),
        ];
        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();

        let bar = bar_position(&projects[1], &extent, today());
        assert_eq!(bar.offset_percent, Decimal::from(50));
        assert_eq!(bar.width_percent, Decimal::from(50));
    }

    #[test]
    fn test_degenerate_extent_yields_full_width_bar() {
        let projects = vec![project((2025, 3, 15), Some((2025, 3, 15)))];
        let extent = TimelineExtent::from_projects(&projects, today()).unwrap();
        assert_eq!(extent.min_date, extent.max_date);

        let bar = bar_position(&projects[0], &extent, today());
        assert_eq!(bar.offset_percent, Decimal::ZERO);
        assert_eq!(bar.width_percent, Decimal::ONE_HUNDRED);
    }
}
