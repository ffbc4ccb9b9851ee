//! Forecast API client
//!
//! Integrates with the Open-Meteo forecast API for per-day summaries and
//! per-hour temperature series over the trip window.

use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::{DateWindow, GpsCoordinates};

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};

/// Daily fields requested from the provider
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,snowfall_sum";

/// Forecast API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    timezone: String,
}

/// Per-day series for one waypoint, index-aligned to the window
#[derive(Debug, Clone)]
pub struct DailySeries {
    pub max_temp: Vec<Option<Decimal>>,
    pub min_temp: Vec<Option<Decimal>>,
    pub precip: Vec<Option<Decimal>>,
    pub snow: Vec<Option<Decimal>>,
}

/// Flat per-hour temperature series plus per-day totals
#[derive(Debug, Clone)]
pub struct HourlySeries {
    /// One entry per hour of the window, day-major
    pub temps: Vec<Option<Decimal>>,
    pub precip: Vec<Option<Decimal>>,
    pub snow: Vec<Option<Decimal>>,
}

/// Open-Meteo response for the daily request
#[derive(Debug, Deserialize)]
struct OMDailyResponse {
    daily: OMDailyBlock,
}

#[derive(Debug, Deserialize)]
struct OMDailyBlock {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    snowfall_sum: Vec<Option<f64>>,
}

/// Open-Meteo response for the hourly request
#[derive(Debug, Deserialize)]
struct OMHourlyResponse {
    hourly: OMHourlyBlock,
    daily: OMTotalsBlock,
}

#[derive(Debug, Deserialize)]
struct OMHourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OMTotalsBlock {
    time: Vec<String>,
    precipitation_sum: Vec<Option<f64>>,
    snowfall_sum: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    /// Create a new client from the provider configuration
    pub fn new(provider: &ProviderConfig, timezone: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: provider.base_url.clone(),
            timezone: timezone.to_string(),
        })
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(base_url: String, timezone: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            timezone,
        }
    }

    /// Fetch the per-day summary series for one waypoint
    pub async fn get_daily_forecast(
        &self,
        coordinates: &GpsCoordinates,
        window: &DateWindow,
    ) -> AppResult<DailySeries> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", self.timezone.clone()),
                ("start_date", window.start_date().to_string()),
                ("end_date", window.end_date().to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!(
                "forecast API returned {}: {}",
                status, body
            )));
        }

        let data: OMDailyResponse = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;

        Self::convert_daily(data, window)
    }

    /// Fetch the per-hour temperature series plus daily totals for one
    /// waypoint
    pub async fn get_hourly_forecast(
        &self,
        coordinates: &GpsCoordinates,
        window: &DateWindow,
    ) -> AppResult<HourlySeries> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("hourly", "temperature_2m".to_string()),
                ("daily", "precipitation_sum,snowfall_sum".to_string()),
                ("timezone", self.timezone.clone()),
                ("start_date", window.start_date().to_string()),
                ("end_date", window.end_date().to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!(
                "forecast API returned {}: {}",
                status, body
            )));
        }

        let data: OMHourlyResponse = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;

        Self::convert_hourly(data, window)
    }

    /// Convert the daily response, checking every series covers the window
    fn convert_daily(data: OMDailyResponse, window: &DateWindow) -> AppResult<DailySeries> {
        let days = window.days;
        let daily = data.daily;
        if daily.time.len() != days
            || daily.temperature_2m_max.len() != days
            || daily.temperature_2m_min.len() != days
            || daily.precipitation_sum.len() != days
            || daily.snowfall_sum.len() != days
        {
            return Err(AppError::MalformedResponse(format!(
                "daily series length mismatch: expected {} entries",
                days
            )));
        }
        Ok(DailySeries {
            max_temp: to_decimals(daily.temperature_2m_max),
            min_temp: to_decimals(daily.temperature_2m_min),
            precip: to_decimals(daily.precipitation_sum),
            snow: to_decimals(daily.snowfall_sum),
        })
    }

    /// Convert the hourly response, checking the flat series covers every
    /// hour of the window
    fn convert_hourly(data: OMHourlyResponse, window: &DateWindow) -> AppResult<HourlySeries> {
        let days = window.days;
        let hours = days * shared::HOURS_PER_DAY;
        if data.hourly.time.len() != hours || data.hourly.temperature_2m.len() != hours {
            return Err(AppError::MalformedResponse(format!(
                "hourly series length mismatch: expected {} entries",
                hours
            )));
        }
        if data.daily.time.len() != days
            || data.daily.precipitation_sum.len() != days
            || data.daily.snowfall_sum.len() != days
        {
            return Err(AppError::MalformedResponse(format!(
                "daily totals length mismatch: expected {} entries",
                days
            )));
        }
        Ok(HourlySeries {
            temps: to_decimals(data.hourly.temperature_2m),
            precip: to_decimals(data.daily.precipitation_sum),
            snow: to_decimals(data.daily.snowfall_sum),
        })
    }
}

/// Convert provider floats, dropping values Decimal cannot represent
fn to_decimals(values: Vec<Option<f64>>) -> Vec<Option<Decimal>> {
    values
        .into_iter()
        .map(|value| value.and_then(Decimal::from_f64_retain))
        .collect()
}
