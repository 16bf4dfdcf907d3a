//! Cost models

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded expenditure against a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cost {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub category: CostCategory,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Expense category of a cost record.
///
/// Category strings outside the fixed set are not rejected; they are kept
/// under their literal value and aggregated like any other category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "String", into = "String")]
pub enum CostCategory {
    Seeds,
    Fertilizer,
    Labor,
    Equipment,
    Pesticides,
    Other,
    /// Unrecognized category, preserved as-is
    Custom(String),
}

impl CostCategory {
    pub fn as_str(&self) -> &str {
        match self {
            CostCategory::Seeds => "seeds",
            CostCategory::Fertilizer => "fertilizer",
            CostCategory::Labor => "labor",
            CostCategory::Equipment => "equipment",
            CostCategory::Pesticides => "pesticides",
            CostCategory::Other => "other",
            CostCategory::Custom(name) => name,
        }
    }

    /// Whether this is one of the categories offered by entry forms
    pub fn is_known(&self) -> bool {
        !matches!(self, CostCategory::Custom(_))
    }
}

impl From<String> for CostCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "seeds" => CostCategory::Seeds,
            "fertilizer" => CostCategory::Fertilizer,
            "labor" => CostCategory::Labor,
            "equipment" => CostCategory::Equipment,
            "pesticides" => CostCategory::Pesticides,
            "other" => CostCategory::Other,
            _ => CostCategory::Custom(value),
        }
    }
}

impl From<&str> for CostCategory {
    fn from(value: &str) -> Self {
        CostCategory::from(value.to_string())
    }
}

impl From<CostCategory> for String {
    fn from(value: CostCategory) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_round_trip() {
        for name in ["seeds", "fertilizer", "labor", "equipment", "pesticides", "other"] {
            let category = CostCategory::from(name);
            assert!(category.is_known());
            assert_eq!(category.as_str(), name);
        }
    }

    #[test]
    fn test_unknown_category_preserved() {
        let category = CostCategory::from("irrigation");
        assert!(!category.is_known());
        assert_eq!(category.as_str(), "irrigation");
    }

    #[test]
    fn test_category_serializes_as_plain_string() {
        let json = serde_json::to_string(&CostCategory::Seeds).unwrap();
        assert_eq!(json, "\"seeds\"");

        let parsed: CostCategory = serde_json::from_str("\"drainage\"").unwrap();
        assert_eq!(parsed, CostCategory::Custom("drainage".to_string()));
    }
}
