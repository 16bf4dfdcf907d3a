//! Harvest models

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded yield event for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Harvest {
    pub id: Uuid,
    pub project_id: Uuid,
    pub date: NaiveDate,
    /// Harvested quantity, always positive
    pub quantity: Decimal,
    pub quality: QualityGrade,
    /// Sale price per unit; absent while the harvest is unsold
    pub unit_price: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Quality grade assigned to a harvest.
///
/// Like cost categories, grade strings outside the fixed set are preserved
/// as-is rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum QualityGrade {
    Excellent,
    Good,
    Average,
    Poor,
    /// Unrecognized grade, preserved as-is
    Custom(String),
}

impl QualityGrade {
    pub fn as_str(&self) -> &str {
        match self {
            QualityGrade::Excellent => "excellent",
            QualityGrade::Good => "good",
            QualityGrade::Average => "average",
            QualityGrade::Poor => "poor",
            QualityGrade::Custom(name) => name,
        }
    }
}

impl From<String> for QualityGrade {
    fn from(value: String) -> Self {
        match value.as_str() {
            "excellent" => QualityGrade::Excellent,
            "good" => QualityGrade::Good,
            "average" => QualityGrade::Average,
            "poor" => QualityGrade::Poor,
            _ => QualityGrade::Custom(value),
        }
    }
}

impl From<&str> for QualityGrade {
    fn from(value: &str) -> Self {
        QualityGrade::from(value.to_string())
    }
}

impl From<QualityGrade> for String {
    fn from(value: QualityGrade) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
