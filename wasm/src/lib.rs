//! WebAssembly module for the FarmTrack platform
//!
//! Provides client-side computation for:
//! - Project financial metrics (totals, profit, per-unit economics)
//! - Yield and margin percentages with the display clamp
//! - Timeline bar layout
//! - Offline form validation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::metrics::{self, ProjectMetrics};
use shared::models::{Cost, Harvest, Project};
use shared::timeline::{bar_position, TimelineExtent};

// Re-export shared validation for use in JavaScript-driven forms
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Compute the full metric bundle for a project from JSON-encoded records
#[wasm_bindgen]
pub fn compute_project_metrics(
    project_json: &str,
    costs_json: &str,
    harvests_json: &str,
) -> Result<String, JsValue> {
    let project: Project = serde_json::from_str(project_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid project JSON: {}", e)))?;
    let costs: Vec<Cost> = serde_json::from_str(costs_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid costs JSON: {}", e)))?;
    let harvests: Vec<Harvest> = serde_json::from_str(harvests_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid harvests JSON: {}", e)))?;

    let bundle = ProjectMetrics::compute(&project, &costs, &harvests);
    serde_json::to_string(&bundle)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Yield percentage relative to the expected yield (unclamped)
#[wasm_bindgen]
pub fn calculate_yield_percentage(total_harvested: f64, expected_yield: f64) -> f64 {
    let pct = metrics::yield_percentage(
        Decimal::from_f64_retain(total_harvested).unwrap_or_default(),
        Decimal::from_f64_retain(expected_yield).unwrap_or_default(),
    );
    pct.to_string().parse().unwrap_or(0.0)
}

/// Profit margin percentage (zero without revenue)
#[wasm_bindgen]
pub fn calculate_profit_margin(profit: f64, revenue: f64) -> f64 {
    let pct = metrics::profit_margin(
        Decimal::from_f64_retain(profit).unwrap_or_default(),
        Decimal::from_f64_retain(revenue).unwrap_or_default(),
    );
    pct.to_string().parse().unwrap_or(0.0)
}

/// Clamp a percentage into [0, 100] for progress-bar display
#[wasm_bindgen]
pub fn clamp_progress_percent(percent: f64) -> f64 {
    let clamped = metrics::clamp_progress(Decimal::from_f64_retain(percent).unwrap_or_default());
    clamped.to_string().parse().unwrap_or(0.0)
}

/// Compute timeline bar positions for a set of projects.
///
/// `today` is an ISO date (YYYY-MM-DD) supplied by the caller so the layout
/// stays deterministic.
#[wasm_bindgen]
pub fn compute_timeline_layout(projects_json: &str, today: &str) -> Result<String, JsValue> {
    let projects: Vec<Project> = serde_json::from_str(projects_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid projects JSON: {}", e)))?;
    let today: NaiveDate = today
        .parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date: {}", e)))?;

    let extent = TimelineExtent::from_projects(&projects, today);
    let bars: Vec<serde_json::Value> = match extent {
        Some(extent) => projects
            .iter()
            .map(|project| {
                let position = bar_position(project, &extent, today);
                serde_json::json!({
                    "project_id": project.id,
                    "name": project.name,
                    "position": position,
                })
            })
            .collect(),
        None => Vec::new(),
    };

    serde_json::to_string(&serde_json::json!({ "extent": extent, "bars": bars }))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Validate an email address for the registration form
#[wasm_bindgen]
pub fn is_valid_email(email: &str) -> bool {
    shared::validation::validate_email(email).is_ok()
}

/// Validate a harvest quantity before submission
#[wasm_bindgen]
pub fn is_valid_harvest_quantity(quantity: f64) -> bool {
    Decimal::from_f64_retain(quantity)
        .map(|q| shared::validation::validate_harvest_quantity(q).is_ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yield_percentage_unclamped() {
        let pct = calculate_yield_percentage(150.0, 100.0);
        assert!((pct - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_clamp_progress_percent() {
        assert!((clamp_progress_percent(150.0) - 100.0).abs() < 0.001);
        assert!(clamp_progress_percent(-10.0).abs() < 0.001);
        assert!((clamp_progress_percent(42.0) - 42.0).abs() < 0.001);
    }

    #[test]
    fn test_profit_margin_zero_revenue() {
        assert_eq!(calculate_profit_margin(-30.0, 0.0), 0.0);
    }

    #[test]
    fn test_is_valid_harvest_quantity() {
        assert!(is_valid_harvest_quantity(10.0));
        assert!(!is_valid_harvest_quantity(0.0));
        assert!(!is_valid_harvest_quantity(-3.0));
    }
}
