//! Validation for trip configuration values
//!
//! Applied once at load time so the pipeline can trust the configuration.

use rust_decimal::Decimal;

use crate::models::Waypoint;
use crate::types::{DateWindow, GpsCoordinates};

/// Length of the published forecast window, in days
pub const WINDOW_DAYS: usize = 8;

/// Validate a waypoint key: non-empty, short, usable as a bare identifier
/// in the published data literal
pub fn validate_waypoint_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("Waypoint key must not be empty");
    }
    if key.len() > 32 {
        return Err("Waypoint key must be at most 32 characters");
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Waypoint key must be alphanumeric or underscore");
    }
    if key.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Err("Waypoint key must not start with a digit");
    }
    Ok(())
}

/// Validate WGS84 coordinate bounds
pub fn validate_coordinates(coordinates: &GpsCoordinates) -> Result<(), &'static str> {
    if coordinates.latitude < Decimal::from(-90) || coordinates.latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    if coordinates.longitude < Decimal::from(-180) || coordinates.longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate the trip window covers exactly the published number of days
pub fn validate_window(window: &DateWindow) -> Result<(), &'static str> {
    if window.days != WINDOW_DAYS {
        return Err("Trip window must cover exactly 8 days");
    }
    Ok(())
}

/// Validate the waypoint set: non-empty, keys unique
pub fn validate_waypoints(waypoints: &[Waypoint]) -> Result<(), &'static str> {
    if waypoints.is_empty() {
        return Err("At least one waypoint must be configured");
    }
    for (i, waypoint) in waypoints.iter().enumerate() {
        if waypoints[..i].iter().any(|other| other.key == waypoint.key) {
            return Err("Waypoint keys must be unique");
        }
    }
    Ok(())
}
