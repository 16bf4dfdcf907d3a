//! Weather service for current conditions, forecasts, and stored snapshots
//!
//! Supplementary display data: fetched from the external API on demand and
//! snapshotted so dashboards can show recent history without refetching.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::WeatherConfig;
use crate::error::AppResult;
use crate::external::weather::{ForecastEntry, WeatherClient};
use crate::models::{DailyForecast, WeatherSnapshot};
use shared::types::{DateRange, GpsCoordinates};

/// Weather service
#[derive(Clone)]
pub struct WeatherService {
    db: PgPool,
    client: WeatherClient,
    latitude: f64,
    longitude: f64,
}

/// Database row for a weather snapshot
#[derive(Debug, Clone, sqlx::FromRow)]
struct WeatherSnapshotRow {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
    pub wind_speed_mps: Decimal,
    pub precipitation_mm: Decimal,
    pub conditions: String,
}

impl From<WeatherSnapshotRow> for WeatherSnapshot {
    fn from(row: WeatherSnapshotRow) -> Self {
        Self {
            id: row.id,
            recorded_at: row.recorded_at,
            location: GpsCoordinates::new(row.latitude, row.longitude),
            temperature_celsius: row.temperature_celsius,
            humidity_percent: row.humidity_percent,
            wind_speed_mps: row.wind_speed_mps,
            precipitation_mm: row.precipitation_mm,
            conditions: row.conditions,
        }
    }
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(db: PgPool, config: &WeatherConfig) -> Self {
        Self {
            db,
            client: WeatherClient::new(config.api_key.clone(), config.api_endpoint.clone()),
            latitude: config.default_latitude,
            longitude: config.default_longitude,
        }
    }

    /// Fetch current conditions and store them as a snapshot
    pub async fn fetch_current(&self) -> AppResult<WeatherSnapshot> {
        let current = self
            .client
            .get_current_weather(self.latitude, self.longitude)
            .await?;

        let row = sqlx::query_as::<_, WeatherSnapshotRow>(
            r#"
            INSERT INTO weather_snapshots (recorded_at, latitude, longitude,
                                           temperature_celsius, humidity_percent,
                                           wind_speed_mps, precipitation_mm, conditions)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, recorded_at, latitude, longitude, temperature_celsius,
                      humidity_percent, wind_speed_mps, precipitation_mm, conditions
            "#,
        )
        .bind(current.timestamp)
        .bind(Decimal::from_f64_retain(self.latitude).unwrap_or_default())
        .bind(Decimal::from_f64_retain(self.longitude).unwrap_or_default())
        .bind(current.temperature_celsius)
        .bind(current.humidity_percent)
        .bind(current.wind_speed_mps)
        .bind(current.rain_1h_mm.unwrap_or(Decimal::ZERO))
        .bind(&current.condition)
        .fetch_one(&self.db)
        .await?;

        Ok(WeatherSnapshot::from(row))
    }

    /// Five-day forecast, folded from the API's 3-hourly entries
    pub async fn daily_forecast(&self) -> AppResult<Vec<DailyForecast>> {
        let entries = self
            .client
            .get_forecast(self.latitude, self.longitude)
            .await?;

        Ok(fold_to_daily(&entries))
    }

    /// Stored snapshots within a date range, oldest first
    pub async fn list_snapshots(&self, range: &DateRange) -> AppResult<Vec<WeatherSnapshot>> {
        let rows = sqlx::query_as::<_, WeatherSnapshotRow>(
            r#"
            SELECT id, recorded_at, latitude, longitude, temperature_celsius,
                   humidity_percent, wind_speed_mps, precipitation_mm, conditions
            FROM weather_snapshots
            WHERE recorded_at::date BETWEEN $1 AND $2
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(WeatherSnapshot::from).collect())
    }
}

/// Collapse 3-hourly forecast entries into one entry per day
fn fold_to_daily(entries: &[ForecastEntry]) -> Vec<DailyForecast> {
    let mut days: Vec<DailyForecast> = Vec::new();

    for entry in entries {
        let date = entry.timestamp.date_naive();
        let pop_percent = (entry.pop * Decimal::ONE_HUNDRED).to_i32().unwrap_or(0);

        match days.last_mut().filter(|day| day.date == date) {
            Some(day) => {
                day.high_celsius = day.high_celsius.max(entry.temp_max_celsius);
                day.low_celsius = day.low_celsius.min(entry.temp_min_celsius);
                if pop_percent > day.precipitation_probability {
                    day.precipitation_probability = pop_percent;
                    day.conditions = entry.condition.clone();
                }
            }
            None => days.push(DailyForecast {
                date,
                high_celsius: entry.temp_max_celsius,
                low_celsius: entry.temp_min_celsius,
                precipitation_probability: pop_percent,
                conditions: entry.condition.clone(),
            }),
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry(day: u32, hour: u32, min: i64, max: i64, pop_hundredths: i64) -> ForecastEntry {
        ForecastEntry {
            timestamp: Utc.with_ymd_and_hms(2025, 7, day, hour, 0, 0).unwrap(),
            temp_min_celsius: Decimal::from(min),
            temp_max_celsius: Decimal::from(max),
            pop: Decimal::new(pop_hundredths, 2),
            condition: if pop_hundredths >= 50 { "Rain" } else { "Clear" }.to_string(),
        }
    }

    #[test]
    fn test_fold_groups_by_day() {
        let entries = vec![
            entry(1, 6, 18, 24, 10),
            entry(1, 12, 20, 29, 70),
            entry(2, 6, 17, 22, 0),
        ];

        let days = fold_to_daily(&entries);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].high_celsius, Decimal::from(29));
        assert_eq!(days[0].low_celsius, Decimal::from(18));
        assert_eq!(days[0].precipitation_probability, 70);
        assert_eq!(days[0].conditions, "Rain");
        assert_eq!(days[1].precipitation_probability, 0);
    }

    #[test]
    fn test_fold_empty_forecast() {
        assert!(fold_to_daily(&[]).is_empty());
    }
}
