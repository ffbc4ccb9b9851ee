//! Trip weather updater - entry point
//!
//! Fetches the short-range forecast for every waypoint on the route,
//! derives a road-risk assessment for each day, and rewrites the generated
//! data block of the trip map page. Intended to be run on a schedule; a
//! waypoint that fails to fetch is skipped and picked up by the next run.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chrono::Utc;

use trip_weather_updater::config::Config;
use trip_weather_updater::error::AppError;
use trip_weather_updater::external::OpenMeteoClient;
use trip_weather_updater::services::{publisher, ForecastService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_weather_updater=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load().map_err(|e| AppError::Configuration(e.to_string()))?;

    tracing::info!("Starting trip weather update");
    tracing::info!(
        waypoints = config.trip.waypoints.len(),
        start = %config.trip.start_date,
        days = config.trip.days,
        "Window configured"
    );

    let client = OpenMeteoClient::new(&config.provider, &config.trip.timezone)?;
    let service = ForecastService::new(client, config.clone());

    let table = service.build_table().await;

    if let Some(day) = table.first_empty_day() {
        tracing::error!(day, "No waypoint produced data for a window day");
        tracing::error!("❌ Failed to fetch complete weather data");
        return Err(AppError::IncompleteData(format!("no data for {}", day)).into());
    }

    publisher::publish(&config.document, &table, Utc::now())?;

    tracing::info!(
        entries = table.entry_count(),
        document = %config.document.path,
        "✅ Weather data updated successfully"
    );

    Ok(())
}
