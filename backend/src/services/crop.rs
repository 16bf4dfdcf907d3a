//! Crop planting service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Crop;
use shared::validation::validate_area;

use super::project::ProjectService;

/// Crop service for managing planting records
#[derive(Clone)]
pub struct CropService {
    db: PgPool,
}

/// Database row for a crop
#[derive(Debug, Clone, sqlx::FromRow)]
struct CropRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub variety: Option<String>,
    pub planting_date: NaiveDate,
    pub area_acres: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<CropRow> for Crop {
    fn from(row: CropRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            variety: row.variety,
            planting_date: row.planting_date,
            area_acres: row.area_acres,
            created_at: row.created_at,
        }
    }
}

/// Input for recording a planting
#[derive(Debug, Deserialize)]
pub struct RecordCropInput {
    pub name: String,
    pub variety: Option<String>,
    pub planting_date: NaiveDate,
    pub area_acres: Decimal,
}

impl CropService {
    /// Create a new CropService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List crops for a project, most recently planted first
    pub async fn list_crops(&self, user_id: Uuid, project_id: Uuid) -> AppResult<Vec<Crop>> {
        ProjectService::ensure_project(&self.db, user_id, project_id).await?;

        let rows = sqlx::query_as::<_, CropRow>(
            r#"
            SELECT id, project_id, name, variety, planting_date, area_acres, created_at
            FROM crops
            WHERE project_id = $1
            ORDER BY planting_date DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Crop::from).collect())
    }

    /// Record a new planting
    pub async fn record_crop(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        input: RecordCropInput,
    ) -> AppResult<Crop> {
        ProjectService::ensure_project(&self.db, user_id, project_id).await?;

        validate_area(input.area_acres).map_err(|msg| AppError::Validation {
            field: "area_acres".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, CropRow>(
            r#"
            INSERT INTO crops (project_id, name, variety, planting_date, area_acres)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, project_id, name, variety, planting_date, area_acres, created_at
            "#,
        )
        .bind(project_id)
        .bind(&input.name)
        .bind(&input.variety)
        .bind(input.planting_date)
        .bind(input.area_acres)
        .fetch_one(&self.db)
        .await?;

        Ok(Crop::from(row))
    }

    /// Delete a planting record
    pub async fn delete_crop(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        crop_id: Uuid,
    ) -> AppResult<()> {
        ProjectService::ensure_project(&self.db, user_id, project_id).await?;

        let result = sqlx::query("DELETE FROM crops WHERE id = $1 AND project_id = $2")
            .bind(crop_id)
            .bind(project_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Crop".to_string()));
        }

        Ok(())
    }
}
