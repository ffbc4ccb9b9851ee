//! Common types used across the pipeline

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The fixed window of consecutive trip dates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub days: usize,
}

impl DateWindow {
    pub fn new(start: NaiveDate, days: usize) -> Self {
        Self { start, days }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last date covered by the window
    pub fn end_date(&self) -> NaiveDate {
        self.start + chrono::Days::new(self.days.saturating_sub(1) as u64)
    }

    /// Stable day keys, "day1" through "day{n}", in window order
    pub fn day_keys(&self) -> Vec<String> {
        (1..=self.days).map(|n| format!("day{}", n)).collect()
    }
}
