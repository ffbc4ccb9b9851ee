//! Forecast assembly
//!
//! Fetches each waypoint, extracts per-day observations, classifies road
//! risk (daily mode), and accumulates the weather table. A failed fetch
//! skips that waypoint for all of its days; the run continues.

use rust_decimal::{Decimal, RoundingStrategy};

use shared::{
    classify, DailyObservation, DateWindow, HourlyObservation, Observation, Waypoint,
    WaypointEntry, WeatherTable, HOURS_PER_DAY,
};

use crate::config::{Config, ForecastMode};
use crate::error::AppResult;
use crate::external::open_meteo::{DailySeries, HourlySeries};
use crate::external::OpenMeteoClient;

/// Builds the weather table for one run
pub struct ForecastService {
    client: OpenMeteoClient,
    config: Config,
}

impl ForecastService {
    pub fn new(client: OpenMeteoClient, config: Config) -> Self {
        Self { client, config }
    }

    /// Fetch every configured waypoint and assemble the table.
    ///
    /// Each waypoint gets exactly one attempt; scheduled re-runs are the
    /// retry mechanism.
    pub async fn build_table(&self) -> WeatherTable {
        let window = self.config.trip.window();
        let mut table = WeatherTable::new(&window);

        for waypoint in &self.config.trip.waypoints {
            tracing::info!(waypoint = %waypoint.key, "fetching forecast");
            let result = match self.config.provider.mode {
                ForecastMode::Daily => self.fetch_daily(waypoint, &window).await,
                ForecastMode::Hourly => self.fetch_hourly(waypoint, &window).await,
            };
            match result {
                Ok(entries) => {
                    for (slot, entry) in table.days.iter_mut().zip(entries) {
                        slot.entries.push(entry);
                    }
                }
                Err(e) => {
                    tracing::warn!(waypoint = %waypoint.key, error = %e, "skipping waypoint");
                }
            }
        }

        table
    }

    /// One entry per window day from the per-day series, classified when
    /// both temperatures are known
    async fn fetch_daily(
        &self,
        waypoint: &Waypoint,
        window: &DateWindow,
    ) -> AppResult<Vec<WaypointEntry>> {
        let series = self
            .client
            .get_daily_forecast(&waypoint.coordinates, window)
            .await?;

        Ok((0..window.days)
            .map(|day| {
                let observation = extract_daily(&series, day);
                let risk = match (observation.high, observation.low) {
                    (Some(high), Some(low)) => {
                        Some(classify(high, low, observation.snow, observation.precip))
                    }
                    _ => None,
                };
                WaypointEntry {
                    waypoint: waypoint.key.clone(),
                    observation: Observation::Daily(observation),
                    risk,
                }
            })
            .collect())
    }

    /// One entry per window day from the hourly series; the page derives
    /// its own assessment from the raw temperatures
    async fn fetch_hourly(
        &self,
        waypoint: &Waypoint,
        window: &DateWindow,
    ) -> AppResult<Vec<WaypointEntry>> {
        let series = self
            .client
            .get_hourly_forecast(&waypoint.coordinates, window)
            .await?;

        Ok((0..window.days)
            .map(|day| WaypointEntry {
                waypoint: waypoint.key.clone(),
                observation: Observation::Hourly(extract_hourly(&series, day)),
                risk: None,
            })
            .collect())
    }
}

/// Round to one decimal place, half away from zero, minimal display form
fn round1(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Extract one day's summary from a per-day series.
///
/// Missing temperatures stay unknown; missing precipitation and snowfall
/// totals read as zero.
pub fn extract_daily(series: &DailySeries, day: usize) -> DailyObservation {
    DailyObservation {
        high: series.max_temp.get(day).copied().flatten().map(round1),
        low: series.min_temp.get(day).copied().flatten().map(round1),
        snow: series
            .snow
            .get(day)
            .copied()
            .flatten()
            .map(round1)
            .unwrap_or(Decimal::ZERO),
        precip: series
            .precip
            .get(day)
            .copied()
            .flatten()
            .map(round1)
            .unwrap_or(Decimal::ZERO),
    }
}

/// Extract one day's hourly block from the flat series.
///
/// Hour `h` of day `d` lives at flat index `d * 24 + h`.
pub fn extract_hourly(series: &HourlySeries, day: usize) -> HourlyObservation {
    let start = day * HOURS_PER_DAY;
    let temps: Vec<Option<Decimal>> = (0..HOURS_PER_DAY)
        .map(|hour| {
            series
                .temps
                .get(start + hour)
                .copied()
                .flatten()
                .map(round1)
        })
        .collect();
    let snow = series
        .snow
        .get(day)
        .copied()
        .flatten()
        .map(round1)
        .unwrap_or(Decimal::ZERO);
    let precip = series
        .precip
        .get(day)
        .copied()
        .flatten()
        .map(round1)
        .unwrap_or(Decimal::ZERO);
    HourlyObservation::from_hours(temps, snow, precip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn daily_series(days: usize) -> DailySeries {
        DailySeries {
            max_temp: vec![Some(dec("5.0")); days],
            min_temp: vec![Some(dec("1.0")); days],
            precip: vec![Some(dec("0.0")); days],
            snow: vec![Some(dec("0.0")); days],
        }
    }

    #[test]
    fn test_daily_extraction_rounds_half_away_from_zero() {
        let mut series = daily_series(8);
        series.max_temp[0] = Some(dec("2.25"));
        series.min_temp[0] = Some(dec("-2.25"));
        let obs = extract_daily(&series, 0);
        assert_eq!(obs.high, Some(dec("2.3")));
        assert_eq!(obs.low, Some(dec("-2.3")));
    }

    #[test]
    fn test_daily_extraction_missing_temperature_stays_unknown() {
        let mut series = daily_series(8);
        series.max_temp[3] = None;
        let obs = extract_daily(&series, 3);
        assert_eq!(obs.high, None);
        assert_eq!(obs.low, Some(dec("1")));
    }

    #[test]
    fn test_daily_extraction_missing_totals_read_as_zero() {
        let mut series = daily_series(8);
        series.snow[2] = None;
        series.precip[2] = None;
        let obs = extract_daily(&series, 2);
        assert_eq!(obs.snow, Decimal::ZERO);
        assert_eq!(obs.precip, Decimal::ZERO);
    }

    #[test]
    fn test_daily_extraction_normalizes_display_form() {
        let mut series = daily_series(8);
        series.snow[1] = Some(dec("6.04"));
        let obs = extract_daily(&series, 1);
        assert_eq!(obs.snow.to_string(), "6");
    }

    #[test]
    fn test_hourly_index_mapping() {
        // Flat value at index i is i itself, so any off-by-one shows up
        let hours = 8 * HOURS_PER_DAY;
        let series = HourlySeries {
            temps: (0..hours).map(|i| Some(Decimal::from(i as i64))).collect(),
            precip: vec![Some(Decimal::ZERO); 8],
            snow: vec![Some(Decimal::ZERO); 8],
        };
        let obs = extract_hourly(&series, 2);
        // Day 2, hour 5 maps to absolute index 53
        assert_eq!(obs.temps[5], Some(Decimal::from(53)));
        assert_eq!(obs.temps[0], Some(Decimal::from(48)));
        assert_eq!(obs.temps[23], Some(Decimal::from(71)));
    }

    #[test]
    fn test_hourly_extraction_derives_overnight_low() {
        let mut temps = vec![Some(dec("3.0")); 8 * HOURS_PER_DAY];
        // Day 1, hour 4: coldest overnight hour
        temps[HOURS_PER_DAY + 4] = Some(dec("-2.0"));
        // Day 1, hour 12: colder still, but daytime
        temps[HOURS_PER_DAY + 12] = Some(dec("-5.0"));
        let series = HourlySeries {
            temps,
            precip: vec![Some(Decimal::ZERO); 8],
            snow: vec![Some(Decimal::ZERO); 8],
        };
        let obs = extract_hourly(&series, 1);
        assert_eq!(obs.overnight_low, Some(dec("-2")));
        assert_eq!(obs.low, Some(dec("-5")));
        assert_eq!(obs.high, Some(dec("3")));
    }
}
