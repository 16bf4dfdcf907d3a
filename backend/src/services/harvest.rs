//! Harvest recording service
//!
//! A harvest may be recorded before it is sold; the unit price stays absent
//! until then and the harvest contributes no revenue.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Harvest, QualityGrade};
use shared::validation::{validate_harvest_quantity, validate_unit_price};

use super::project::ProjectService;

/// Harvest service for recording yield events
#[derive(Clone)]
pub struct HarvestService {
    db: PgPool,
}

/// Database row for a harvest
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct HarvestRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub quality: String,
    pub unit_price: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<HarvestRow> for Harvest {
    fn from(row: HarvestRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            date: row.date,
            quantity: row.quantity,
            quality: QualityGrade::from(row.quality),
            unit_price: row.unit_price,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// Input for recording a harvest
#[derive(Debug, Deserialize)]
pub struct RecordHarvestInput {
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub quality: String,
    pub unit_price: Option<Decimal>,
    pub notes: Option<String>,
}

impl HarvestService {
    /// Create a new HarvestService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List harvests for a project, most recent first
    pub async fn list_harvests(&self, user_id: Uuid, project_id: Uuid) -> AppResult<Vec<Harvest>> {
        ProjectService::ensure_project(&self.db, user_id, project_id).await?;

        let rows = sqlx::query_as::<_, HarvestRow>(
            r#"
            SELECT id, project_id, date, quantity, quality, unit_price, notes, created_at
            FROM harvests
            WHERE project_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Harvest::from).collect())
    }

    /// Record a new harvest
    pub async fn record_harvest(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        input: RecordHarvestInput,
    ) -> AppResult<Harvest> {
        ProjectService::ensure_project(&self.db, user_id, project_id).await?;

        validate_harvest_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;
        validate_unit_price(input.unit_price).map_err(|msg| AppError::Validation {
            field: "unit_price".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, HarvestRow>(
            r#"
            INSERT INTO harvests (project_id, date, quantity, quality, unit_price, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, date, quantity, quality, unit_price, notes, created_at
            "#,
        )
        .bind(project_id)
        .bind(input.date)
        .bind(input.quantity)
        .bind(&input.quality)
        .bind(input.unit_price)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(Harvest::from(row))
    }

    /// Delete a harvest
    pub async fn delete_harvest(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        harvest_id: Uuid,
    ) -> AppResult<()> {
        ProjectService::ensure_project(&self.db, user_id, project_id).await?;

        let result = sqlx::query("DELETE FROM harvests WHERE id = $1 AND project_id = $2")
            .bind(harvest_id)
            .bind(project_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Harvest".to_string()));
        }

        Ok(())
    }
}
