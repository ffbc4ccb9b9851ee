//! Waypoint model

use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// A configured stop along the trip route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    /// Short identifier used as the key in the published data literal
    pub key: String,
    /// Display name
    pub name: String,
    pub coordinates: GpsCoordinates,
}

impl Waypoint {
    pub fn new(key: impl Into<String>, name: impl Into<String>, coordinates: GpsCoordinates) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            coordinates,
        }
    }
}
