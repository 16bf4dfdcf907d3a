//! Project management service
//!
//! Projects are the root aggregate: costs, crops, and harvests all hang off
//! a project and are removed with it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Cost, Crop, Harvest, Project, ProjectStatus};
use shared::types::Pagination;
use shared::validation::{validate_area, validate_expected_yield};

use super::cost::CostService;
use super::crop::CropService;
use super::harvest::HarvestService;

/// Project service for managing farm projects
#[derive(Clone)]
pub struct ProjectService {
    db: PgPool,
}

/// Database row for a project
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub land_area_acres: Decimal,
    pub start_date: NaiveDate,
    pub expected_harvest_date: Option<NaiveDate>,
    pub target_sell_price: Decimal,
    pub expected_yield: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            // status column carries a CHECK constraint matching the enum
            status: row.status.parse().unwrap_or_default(),
            land_area_acres: row.land_area_acres,
            start_date: row.start_date,
            expected_harvest_date: row.expected_harvest_date,
            target_sell_price: row.target_sell_price,
            expected_yield: row.expected_yield,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a project
#[derive(Debug, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub description: Option<String>,
    pub land_area_acres: Decimal,
    pub start_date: NaiveDate,
    pub expected_harvest_date: Option<NaiveDate>,
    pub target_sell_price: Decimal,
    pub expected_yield: Decimal,
}

/// Input for updating a project
#[derive(Debug, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub land_area_acres: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
    pub target_sell_price: Option<Decimal>,
    pub expected_yield: Option<Decimal>,
}

/// A project with all of its associated records
#[derive(Debug, Serialize)]
pub struct ProjectDetails {
    pub project: Project,
    pub costs: Vec<Cost>,
    pub crops: Vec<Crop>,
    pub harvests: Vec<Harvest>,
}

const PROJECT_COLUMNS: &str = "id, user_id, name, description, status, land_area_acres, \
     start_date, expected_harvest_date, target_sell_price, expected_yield, \
     created_at, updated_at";

impl ProjectService {
    /// Create a new ProjectService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List projects for a user, most recent first
    pub async fn list_projects(
        &self,
        user_id: Uuid,
        pagination: &Pagination,
    ) -> AppResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// List every project for a user (timeline and dashboard views)
    pub async fn list_all_projects(&self, user_id: Uuid) -> AppResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE user_id = $1 ORDER BY start_date ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Get a project by ID
    pub async fn get_project(&self, user_id: Uuid, project_id: Uuid) -> AppResult<Project> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND user_id = $2"
        ))
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Ok(Project::from(row))
    }

    /// Get a project together with its costs, crops, and harvests
    pub async fn get_project_details(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> AppResult<ProjectDetails> {
        let project = self.get_project(user_id, project_id).await?;

        let costs = CostService::new(self.db.clone())
            .list_costs(user_id, project_id)
            .await?;
        let crops = CropService::new(self.db.clone())
            .list_crops(user_id, project_id)
            .await?;
        let harvests = HarvestService::new(self.db.clone())
            .list_harvests(user_id, project_id)
            .await?;

        Ok(ProjectDetails {
            project,
            costs,
            crops,
            harvests,
        })
    }

    /// Create a new project
    pub async fn create_project(
        &self,
        user_id: Uuid,
        input: CreateProjectInput,
    ) -> AppResult<Project> {
        validate_area(input.land_area_acres).map_err(|msg| AppError::Validation {
            field: "land_area_acres".to_string(),
            message: msg.to_string(),
        })?;
        validate_expected_yield(input.expected_yield).map_err(|msg| AppError::Validation {
            field: "expected_yield".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO projects (user_id, name, description, status, land_area_acres,
                                  start_date, expected_harvest_date, target_sell_price,
                                  expected_yield)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(ProjectStatus::default().as_str())
        .bind(input.land_area_acres)
        .bind(input.start_date)
        .bind(input.expected_harvest_date)
        .bind(input.target_sell_price)
        .bind(input.expected_yield)
        .fetch_one(&self.db)
        .await?;

        Ok(Project::from(row))
    }

    /// Update a project
    pub async fn update_project(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        input: UpdateProjectInput,
    ) -> AppResult<Project> {
        let existing = self.get_project(user_id, project_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let description = input.description.or(existing.description);
        let status = input.status.unwrap_or(existing.status);
        let land_area_acres = input.land_area_acres.unwrap_or(existing.land_area_acres);
        let start_date = input.start_date.unwrap_or(existing.start_date);
        let expected_harvest_date = input
            .expected_harvest_date
            .or(existing.expected_harvest_date);
        let target_sell_price = input.target_sell_price.unwrap_or(existing.target_sell_price);
        let expected_yield = input.expected_yield.unwrap_or(existing.expected_yield);

        validate_area(land_area_acres).map_err(|msg| AppError::Validation {
            field: "land_area_acres".to_string(),
            message: msg.to_string(),
        })?;
        validate_expected_yield(expected_yield).map_err(|msg| AppError::Validation {
            field: "expected_yield".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            UPDATE projects
            SET name = $1, description = $2, status = $3, land_area_acres = $4,
                start_date = $5, expected_harvest_date = $6, target_sell_price = $7,
                expected_yield = $8, updated_at = NOW()
            WHERE id = $9 AND user_id = $10
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&name)
        .bind(&description)
        .bind(status.as_str())
        .bind(land_area_acres)
        .bind(start_date)
        .bind(expected_harvest_date)
        .bind(target_sell_price)
        .bind(expected_yield)
        .bind(project_id)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(Project::from(row))
    }

    /// Delete a project and all of its records
    pub async fn delete_project(&self, user_id: Uuid, project_id: Uuid) -> AppResult<()> {
        // Child rows are removed by ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(project_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        Ok(())
    }

    /// Verify a project exists and belongs to the user
    pub(crate) async fn ensure_project(
        db: &PgPool,
        user_id: Uuid,
        project_id: Uuid,
    ) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        if exists == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        Ok(())
    }
}
