//! Configuration for the trip weather updater
//!
//! Supports hierarchical configuration loading:
//! 1. Built-in itinerary defaults in code
//! 2. Optional configuration file (config/trip.toml)
//! 3. Environment variable overrides with TRIP_ prefix

use chrono::NaiveDate;
use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::{
    validate_coordinates, validate_waypoint_key, validate_waypoints, validate_window, DateWindow,
    GpsCoordinates, Waypoint, WINDOW_DAYS,
};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Route and date window
    pub trip: TripConfig,

    /// Forecast provider
    pub provider: ProviderConfig,

    /// Destination document
    pub document: DocumentConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TripConfig {
    /// First date of the forecast window
    pub start_date: NaiveDate,

    /// Number of days published; the map expects exactly eight
    pub days: usize,

    /// IANA timezone the provider aligns the series to
    pub timezone: String,

    /// Route stops, in display order
    pub waypoints: Vec<Waypoint>,
}

impl TripConfig {
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.days)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    /// Forecast API endpoint
    pub base_url: String,

    /// Per-request timeout in seconds; expiry counts as a fetch failure
    pub timeout_secs: u64,

    /// Which series shape to request and publish
    pub mode: ForecastMode,
}

/// Shape of the requested forecast series
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMode {
    /// Per-day summaries, classified before publishing
    #[default]
    Daily,
    /// Per-hour temperatures; classification is left to the page
    Hourly,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DocumentConfig {
    /// Path of the page carrying the generated data block
    pub path: String,

    /// Label preceding the displayed timestamp
    pub timestamp_label: String,
}

impl Config {
    /// Load configuration from the optional file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(File::with_name("config/trip").required(false))
            .add_source(
                Environment::with_prefix("TRIP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate().map_err(ConfigError::Message)?;
        Ok(config)
    }

    /// Check the loaded values against the domain rules
    pub fn validate(&self) -> Result<(), String> {
        validate_window(&self.trip.window()).map_err(str::to_owned)?;
        validate_waypoints(&self.trip.waypoints).map_err(str::to_owned)?;
        for waypoint in &self.trip.waypoints {
            validate_waypoint_key(&waypoint.key)
                .map_err(|e| format!("waypoint {:?}: {}", waypoint.key, e))?;
            validate_coordinates(&waypoint.coordinates)
                .map_err(|e| format!("waypoint {:?}: {}", waypoint.key, e))?;
        }
        if self.trip.timezone.is_empty() {
            return Err("Trip timezone must not be empty".to_string());
        }
        if self.provider.base_url.is_empty() {
            return Err("Provider base URL must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        // The ten-stop France itinerary the map was built for
        let stop = |key: &str, name: &str, lat: i64, lon: i64| {
            Waypoint::new(
                key,
                name,
                GpsCoordinates::new(Decimal::new(lat, 4), Decimal::new(lon, 4)),
            )
        };
        Self {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 3).expect("valid built-in start date"),
            days: WINDOW_DAYS,
            timezone: "Europe/Paris".to_string(),
            waypoints: vec![
                stop("loctudy", "Loctudy", 478344, -41714),
                stop("quimper", "Quimper", 479960, -41024),
                stop("rennes", "Rennes", 481173, -16778),
                stop("cancale", "Cancale", 486703, -18514),
                stop("avranches", "Avranches", 486839, -13567),
                stop("caen", "Caen", 491829, -3707),
                stop("leMans", "Le Mans", 479959, 1920),
                stop("rouen", "Rouen", 494432, 10999),
                stop("paris", "Paris", 488566, 23522),
                stop("ambleville", "Ambleville", 491456, 17008),
            ],
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            timeout_secs: 30,
            mode: ForecastMode::Daily,
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: "index.html".to_string(),
            timestamp_label: "Weather data updated".to_string(),
        }
    }
}
