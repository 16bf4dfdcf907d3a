//! Cost recording service
//!
//! Category strings are stored as submitted; unrecognized categories are
//! kept under their literal value rather than rejected.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Cost, CostCategory};
use shared::validation::validate_cost_amount;

use super::project::ProjectService;

/// Cost service for recording project expenditures
#[derive(Clone)]
pub struct CostService {
    db: PgPool,
}

/// Database row for a cost
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct CostRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CostRow> for Cost {
    fn from(row: CostRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            amount: row.amount,
            category: CostCategory::from(row.category),
            date: row.date,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Input for recording a cost
#[derive(Debug, Deserialize)]
pub struct RecordCostInput {
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl CostService {
    /// Create a new CostService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List costs for a project, most recent first
    pub async fn list_costs(&self, user_id: Uuid, project_id: Uuid) -> AppResult<Vec<Cost>> {
        ProjectService::ensure_project(&self.db, user_id, project_id).await?;

        let rows = sqlx::query_as::<_, CostRow>(
            r#"
            SELECT id, project_id, name, amount, category, date, description, created_at
            FROM costs
            WHERE project_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Cost::from).collect())
    }

    /// Record a new cost against a project
    pub async fn record_cost(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        input: RecordCostInput,
    ) -> AppResult<Cost> {
        ProjectService::ensure_project(&self.db, user_id, project_id).await?;

        validate_cost_amount(input.amount).map_err(|msg| AppError::Validation {
            field: "amount".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, CostRow>(
            r#"
            INSERT INTO costs (project_id, name, amount, category, date, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, name, amount, category, date, description, created_at
            "#,
        )
        .bind(project_id)
        .bind(&input.name)
        .bind(input.amount)
        .bind(&input.category)
        .bind(input.date)
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(Cost::from(row))
    }

    /// Delete a cost
    pub async fn delete_cost(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        cost_id: Uuid,
    ) -> AppResult<()> {
        ProjectService::ensure_project(&self.db, user_id, project_id).await?;

        let result = sqlx::query("DELETE FROM costs WHERE id = $1 AND project_id = $2")
            .bind(cost_id)
            .bind(project_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cost".to_string()));
        }

        Ok(())
    }
}
