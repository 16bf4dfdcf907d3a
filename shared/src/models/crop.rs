//! Crop planting models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A planting record associated with a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub variety: Option<String>,
    pub planting_date: NaiveDate,
    /// Planted area in acres, always positive
    pub area_acres: Decimal,
    pub created_at: DateTime<Utc>,
}
