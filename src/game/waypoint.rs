//! Coordinates, waypoints and the per-game waypoint list

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinates { lat, lng }
    }

    /// Per-axis proximity check. Both axes must be within `tolerance`
    /// degrees; a difference exactly equal to the tolerance passes.
    pub fn within(&self, target: &Coordinates, tolerance: f64) -> bool {
        (self.lat - target.lat).abs() <= tolerance && (self.lng - target.lng).abs() <= tolerance
    }
}

impl FromStr for Coordinates {
    type Err = Error;

    /// Parse `"lat,lng"`; whitespace around either value is allowed.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("Expected coordinates as \"lat,lng\", got {:?}", s));

        let mut parts = s.split(',');
        let (lat, lng) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lng), None) => (lat.trim(), lng.trim()),
            _ => return Err(invalid()),
        };

        let lat: f64 = lat.parse().map_err(|_| invalid())?;
        let lng: f64 = lng.parse().map_err(|_| invalid())?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid());
        }

        Ok(Coordinates { lat, lng })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// One stop of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub place_id: String,
    pub coordinates: Coordinates,
}

/// Ordered, non-empty list of stops, fixed for the lifetime of a game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointList(Vec<Waypoint>);

impl WaypointList {
    /// Keep the first `max` waypoints in the order given.
    pub fn new(waypoints: impl IntoIterator<Item = Waypoint>, max: usize) -> Result<Self> {
        let waypoints: Vec<_> = waypoints.into_iter().take(max).collect();
        if waypoints.is_empty() {
            return Err(Error::NoWaypointsFound(
                "the place search returned no results".to_string(),
            ));
        }
        Ok(WaypointList(waypoints))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for WaypointList {
    type Output = Waypoint;

    fn index(&self, index: usize) -> &Waypoint {
        &self.0[index]
    }
}

#[cfg(test)]
pub(crate) fn waypoint(name: &str, lat: f64, lng: f64) -> Waypoint {
    Waypoint {
        name: name.to_string(),
        place_id: format!("place-{}", name.to_lowercase().replace(' ', "-")),
        coordinates: Coordinates::new(lat, lng),
    }
}
