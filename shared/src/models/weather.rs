//! Weather data models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GpsCoordinates;

/// A weather snapshot at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub location: GpsCoordinates,
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
    pub wind_speed_mps: Decimal,
    pub precipitation_mm: Decimal,
    pub conditions: String,
}

/// Daily weather forecast entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub high_celsius: Decimal,
    pub low_celsius: Decimal,
    /// Probability of precipitation (0-100)
    pub precipitation_probability: i32,
    pub conditions: String,
}
