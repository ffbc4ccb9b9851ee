//! The per-run weather table
//!
//! Rebuilt from scratch every run and discarded after serialization; no
//! history is carried between runs.

use serde::{Deserialize, Serialize};

use crate::models::{Observation, RiskAssessment};
use crate::types::DateWindow;

/// One waypoint's published fields for one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaypointEntry {
    /// Waypoint key, as configured
    pub waypoint: String,
    pub observation: Observation,
    /// Absent when a temperature was unknown or the run is in hourly mode
    pub risk: Option<RiskAssessment>,
}

/// One day-key slot; entries stay in configured waypoint order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySlot {
    pub key: String,
    pub entries: Vec<WaypointEntry>,
}

/// Day-key → waypoint → derived fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherTable {
    /// One slot per window day, in window order
    pub days: Vec<DaySlot>,
}

impl WeatherTable {
    /// Empty table with one slot per day of the window
    pub fn new(window: &DateWindow) -> Self {
        let days = window
            .day_keys()
            .into_iter()
            .map(|key| DaySlot {
                key,
                entries: Vec::new(),
            })
            .collect();
        Self { days }
    }

    /// Key of the first day no waypoint produced data for, if any
    pub fn first_empty_day(&self) -> Option<&str> {
        self.days
            .iter()
            .find(|day| day.entries.is_empty())
            .map(|day| day.key.as_str())
    }

    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|day| day.entries.len()).sum()
    }
}
