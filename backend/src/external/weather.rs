//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap for current conditions and forecasts

use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Current weather conditions
#[derive(Debug, Clone)]
pub struct CurrentConditions {
    pub timestamp: DateTime<Utc>,
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
    pub wind_speed_mps: Decimal,
    pub rain_1h_mm: Option<Decimal>,
    pub condition: String,
    pub description: String,
}

/// One 3-hourly forecast entry
#[derive(Debug, Clone)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temp_min_celsius: Decimal,
    pub temp_max_celsius: Decimal,
    /// Probability of precipitation (0-1)
    pub pop: Decimal,
    pub condition: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    weather: Vec<OwmWeather>,
    main: OwmMain,
    wind: OwmWind,
    rain: Option<OwmRain>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    pop: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<CurrentConditions> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|_| AppError::WeatherServiceUnavailable)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API error: {} - {}", status, body);
            return Err(AppError::WeatherServiceUnavailable);
        }

        let data: OwmCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to parse weather response: {}", e)))?;

        let weather = data.weather.first();

        Ok(CurrentConditions {
            timestamp: DateTime::from_timestamp(data.dt, 0).unwrap_or_else(Utc::now),
            temperature_celsius: Decimal::from_f64_retain(data.main.temp).unwrap_or_default(),
            humidity_percent: data.main.humidity,
            wind_speed_mps: Decimal::from_f64_retain(data.wind.speed).unwrap_or_default(),
            rain_1h_mm: data
                .rain
                .and_then(|r| r.one_hour)
                .map(|v| Decimal::from_f64_retain(v).unwrap_or_default()),
            condition: weather.map(|w| w.main.clone()).unwrap_or_default(),
            description: weather.map(|w| w.description.clone()).unwrap_or_default(),
        })
    }

    /// Fetch the 3-hourly forecast by GPS coordinates
    pub async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Vec<ForecastEntry>> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|_| AppError::WeatherServiceUnavailable)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API error: {} - {}", status, body);
            return Err(AppError::WeatherServiceUnavailable);
        }

        let data: OwmForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to parse forecast response: {}", e)))?;

        Ok(data
            .list
            .into_iter()
            .map(|item| {
                let weather = item.weather.first();
                ForecastEntry {
                    timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                    temp_min_celsius: Decimal::from_f64_retain(item.main.temp_min)
                        .unwrap_or_default(),
                    temp_max_celsius: Decimal::from_f64_retain(item.main.temp_max)
                        .unwrap_or_default(),
                    pop: Decimal::from_f64_retain(item.pop).unwrap_or_default(),
                    condition: weather.map(|w| w.main.clone()).unwrap_or_default(),
                }
            })
            .collect())
    }
}
