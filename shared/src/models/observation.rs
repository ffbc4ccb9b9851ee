//! Per-day weather observations
//!
//! Temperatures may be unknown and stay unknown; missing snowfall and
//! precipitation totals read as zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hours in one day of an hourly series
pub const HOURS_PER_DAY: usize = 24;

/// Hours counted toward the overnight low (local midnight through 5am)
pub const OVERNIGHT_HOURS: usize = 6;

/// One day's summary for one waypoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyObservation {
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    /// Snowfall total, cm
    pub snow: Decimal,
    /// Precipitation total, mm
    pub precip: Decimal,
}

/// One day's hourly temperature block plus daily totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyObservation {
    /// 24 hourly temperatures, index = hour of day
    pub temps: Vec<Option<Decimal>>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    /// Minimum over the overnight hours, the refreeze signal
    pub overnight_low: Option<Decimal>,
    pub snow: Decimal,
    pub precip: Decimal,
}

impl HourlyObservation {
    /// Build from one day's hourly temperatures and daily totals, deriving
    /// the high/low over all hours and the overnight low over hours 0-5.
    pub fn from_hours(temps: Vec<Option<Decimal>>, snow: Decimal, precip: Decimal) -> Self {
        let overnight_low = temps
            .iter()
            .take(OVERNIGHT_HOURS)
            .flatten()
            .min()
            .copied();
        let high = temps.iter().flatten().max().copied();
        let low = temps.iter().flatten().min().copied();
        Self {
            temps,
            high,
            low,
            overnight_low,
            snow,
            precip,
        }
    }
}

/// Either series shape, as published for one waypoint on one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Observation {
    Daily(DailyObservation),
    Hourly(HourlyObservation),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hours(values: &[Option<&str>]) -> Vec<Option<Decimal>> {
        values.iter().map(|v| v.map(dec)).collect()
    }

    #[test]
    fn test_overnight_low_uses_first_six_hours_only() {
        let mut temps = vec![Some(dec("5.0")); HOURS_PER_DAY];
        temps[2] = Some(dec("-1.5"));
        temps[10] = Some(dec("-8.0")); // daytime dip must not count
        let obs = HourlyObservation::from_hours(temps, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(obs.overnight_low, Some(dec("-1.5")));
        assert_eq!(obs.low, Some(dec("-8.0")));
    }

    #[test]
    fn test_high_low_over_all_hours() {
        let mut temps = vec![Some(Decimal::ZERO); HOURS_PER_DAY];
        temps[13] = Some(dec("7.3"));
        temps[4] = Some(dec("-2.1"));
        let obs = HourlyObservation::from_hours(temps, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(obs.high, Some(dec("7.3")));
        assert_eq!(obs.low, Some(dec("-2.1")));
    }

    #[test]
    fn test_unknown_hours_are_skipped() {
        let temps = hours(&[
            None,
            Some("1.0"),
            None,
            Some("-0.5"),
            None,
            None,
            Some("4.0"),
        ]);
        let obs = HourlyObservation::from_hours(temps, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(obs.overnight_low, Some(dec("-0.5")));
        assert_eq!(obs.high, Some(dec("4.0")));
    }

    #[test]
    fn test_all_unknown_yields_unknown() {
        let obs =
            HourlyObservation::from_hours(vec![None; HOURS_PER_DAY], Decimal::ZERO, Decimal::ZERO);
        assert_eq!(obs.high, None);
        assert_eq!(obs.low, None);
        assert_eq!(obs.overnight_low, None);
    }
}
