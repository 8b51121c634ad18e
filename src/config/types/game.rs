//! Game rule configuration
//!
//! The radii and tolerance defaults reproduce the values the game has always
//! shipped with. `tolerance_deg` is compared per axis against raw degrees, so
//! the default of 2.0 accepts anything within a couple of hundred kilometres.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rules and search parameters for a single game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Time allowed from `start` until `verify` reports a timeout
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
    /// Per-axis tolerance, in degrees, for a location to count as reached
    #[serde(default = "default_tolerance")]
    pub tolerance_deg: f64,
    /// Radius (m) of the keyword search around the start location
    #[serde(default = "default_search_radius")]
    pub search_radius_m: u32,
    /// Radius (m) used to resolve the start location to a place
    #[serde(default = "default_location_radius")]
    pub location_radius_m: u32,
    /// Radius (m) of the sight lookup around each route step
    #[serde(default = "default_sight_radius")]
    pub sight_radius_m: u32,
    /// Maximum waypoints in one game
    #[serde(default = "default_max_waypoints")]
    pub max_waypoints: usize,
    /// Search hits kept per keyword
    #[serde(default = "default_places_per_keyword")]
    pub places_per_keyword: usize,
    /// Hints allowed per game; unlimited when unset
    #[serde(default)]
    pub max_hints: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            timeout: default_timeout(),
            tolerance_deg: default_tolerance(),
            search_radius_m: default_search_radius(),
            location_radius_m: default_location_radius(),
            sight_radius_m: default_sight_radius(),
            max_waypoints: default_max_waypoints(),
            places_per_keyword: default_places_per_keyword(),
            max_hints: None,
        }
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(3600)
}

fn default_tolerance() -> f64 {
    2.0
}

fn default_search_radius() -> u32 {
    1000
}

fn default_location_radius() -> u32 {
    50
}

fn default_sight_radius() -> u32 {
    10
}

fn default_max_waypoints() -> usize {
    5
}

fn default_places_per_keyword() -> usize {
    2
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions untouched for this long are dropped
    #[serde(with = "humantime_serde", default = "default_idle_timeout")]
    pub idle_timeout: Duration,
    /// Upper bound on concurrently held sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            idle_timeout: default_idle_timeout(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_idle_timeout() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_max_sessions() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humantime_durations() {
        let config: GameConfig = serde_json::from_str(r#"{"timeout": "30m", "max_hints": 3}"#).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(1800));
        assert_eq!(config.max_hints, Some(3));
        assert_eq!(config.tolerance_deg, 2.0);
        assert_eq!(config.max_waypoints, 5);
    }
}
