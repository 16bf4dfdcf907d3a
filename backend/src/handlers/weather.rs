//! Weather HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::services::weather::WeatherService;
use crate::AppState;
use shared::types::DateRange;

/// Fetch current conditions (stores a snapshot as a side effect)
pub async fn fetch_current_weather(State(state): State<AppState>) -> impl IntoResponse {
    let service = WeatherService::new(state.db.clone(), &state.config.weather);

    match service.fetch_current().await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Daily forecast for the configured location
pub async fn get_weather_forecast(State(state): State<AppState>) -> impl IntoResponse {
    let service = WeatherService::new(state.db.clone(), &state.config.weather);

    match service.daily_forecast().await {
        Ok(forecast) => {
            (StatusCode::OK, Json(serde_json::json!({ "forecast": forecast }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Stored snapshots within a date range
pub async fn get_weather_snapshots(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> impl IntoResponse {
    let service = WeatherService::new(state.db.clone(), &state.config.weather);

    match service.list_snapshots(&range).await {
        Ok(snapshots) => {
            (StatusCode::OK, Json(serde_json::json!({ "snapshots": snapshots }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
