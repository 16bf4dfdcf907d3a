//! Reporting service for derived metrics, dashboards, and data export
//!
//! This is the seam between persistence and the shared aggregation engine:
//! records are loaded for the requesting user, handed to `shared::metrics`
//! and `shared::timeline` as read-only slices, and the derived bundles are
//! returned to the presentation layer. Nothing derived is persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Cost, CostCategory, Harvest, Project, ProjectStatus};
use shared::metrics::{self, ProjectMetrics};
use shared::timeline::{bar_position, BarPosition, TimelineExtent};

use super::cost::CostRow;
use super::harvest::HarvestRow;
use super::project::ProjectService;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// A project with its full derived metric bundle
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub project: Project,
    pub metrics: ProjectMetrics,
}

/// Dashboard metrics across all of a user's projects
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub total_projects: i64,
    pub active_projects: i64,
    pub completed_projects: i64,
    pub total_cost: Decimal,
    pub total_revenue: Decimal,
    pub total_harvested: Decimal,
    pub net_profit: Decimal,
    pub recent_harvests: i64,
    pub cost_by_category: BTreeMap<CostCategory, Decimal>,
}

/// One positioned bar on the project timeline
#[derive(Debug, Serialize)]
pub struct TimelineBar {
    pub project_id: Uuid,
    pub name: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub expected_harvest_date: Option<NaiveDate>,
    pub position: BarPosition,
}

/// Timeline view over all of a user's projects
#[derive(Debug, Serialize)]
pub struct ProjectTimeline {
    pub extent: Option<TimelineExtent>,
    pub bars: Vec<TimelineBar>,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Full metric bundle for one project
    pub async fn project_summary(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> AppResult<ProjectSummary> {
        let details = ProjectService::new(self.db.clone())
            .get_project_details(user_id, project_id)
            .await?;

        let metrics = ProjectMetrics::compute(&details.project, &details.costs, &details.harvests);

        Ok(ProjectSummary {
            project: details.project,
            metrics,
        })
    }

    /// Aggregate dashboard metrics across every project of the user
    pub async fn dashboard_metrics(&self, user_id: Uuid) -> AppResult<DashboardMetrics> {
        // Project counts by status
        let counts: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE status = 'active') as active,
                COUNT(*) FILTER (WHERE status = 'harvested') as completed
            FROM projects WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        // Harvests recorded in the last 7 days
        let recent_harvests: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM harvests h
            JOIN projects p ON p.id = h.project_id
            WHERE p.user_id = $1
              AND h.date >= CURRENT_DATE - INTERVAL '7 days'
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        // Money totals come from the aggregation engine over loaded records
        let costs = self.load_user_costs(user_id).await?;
        let harvests = self.load_user_harvests(user_id).await?;

        let total_cost = metrics::total_cost(&costs);
        let total_revenue = metrics::total_revenue(&harvests);

        Ok(DashboardMetrics {
            total_projects: counts.0,
            active_projects: counts.1,
            completed_projects: counts.2,
            net_profit: metrics::net_profit(total_revenue, total_cost),
            total_harvested: metrics::total_harvested(&harvests),
            cost_by_category: metrics::cost_breakdown(&costs),
            total_cost,
            total_revenue,
            recent_harvests,
        })
    }

    /// Gantt-style timeline over all projects.
    ///
    /// `today` is supplied by the caller so the layout itself stays a pure
    /// function of its inputs.
    pub async fn project_timeline(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<ProjectTimeline> {
        let projects = ProjectService::new(self.db.clone())
            .list_all_projects(user_id)
            .await?;

        let extent = TimelineExtent::from_projects(&projects, today);
        let bars = match extent {
            Some(extent) => projects
                .into_iter()
                .map(|project| {
                    let position = bar_position(&project, &extent, today);
                    TimelineBar {
                        project_id: project.id,
                        name: project.name,
                        status: project.status,
                        start_date: project.start_date,
                        expected_harvest_date: project.expected_harvest_date,
                        position,
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        Ok(ProjectTimeline { extent, bars })
    }

    /// Export a project's costs as CSV
    pub async fn export_costs_csv(&self, user_id: Uuid, project_id: Uuid) -> AppResult<String> {
        let costs = super::cost::CostService::new(self.db.clone())
            .list_costs(user_id, project_id)
            .await?;

        Self::export_to_csv(&costs)
    }

    /// Serialize records to CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    /// Load every cost across the user's projects
    async fn load_user_costs(&self, user_id: Uuid) -> AppResult<Vec<Cost>> {
        let rows = sqlx::query_as::<_, CostRow>(
            r#"
            SELECT c.id, c.project_id, c.name, c.amount, c.category, c.date,
                   c.description, c.created_at
            FROM costs c
            JOIN projects p ON p.id = c.project_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Cost::from).collect())
    }

    /// Load every harvest across the user's projects
    async fn load_user_harvests(&self, user_id: Uuid) -> AppResult<Vec<Harvest>> {
        let rows = sqlx::query_as::<_, HarvestRow>(
            r#"
            SELECT h.id, h.project_id, h.date, h.quantity, h.quality, h.unit_price,
                   h.notes, h.created_at
            FROM harvests h
            JOIN projects p ON p.id = h.project_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Harvest::from).collect())
    }
}
