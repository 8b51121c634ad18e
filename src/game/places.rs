//! Place lookup: keyword searches around the player become waypoints

use std::sync::Arc;
use tracing::{debug, info};

use super::waypoint::{Waypoint, WaypointList};
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::maps::{NearbySearch, PlacesProvider};

/// Finds waypoints and resolves locations to place ids
#[derive(Clone)]
pub struct PlaceLookup {
    places: Arc<dyn PlacesProvider>,
    search_radius_m: u32,
    location_radius_m: u32,
    places_per_keyword: usize,
    max_waypoints: usize,
}

impl PlaceLookup {
    pub fn new(places: Arc<dyn PlacesProvider>, config: &GameConfig) -> Self {
        PlaceLookup {
            places,
            search_radius_m: config.search_radius_m,
            location_radius_m: config.location_radius_m,
            places_per_keyword: config.places_per_keyword,
            max_waypoints: config.max_waypoints,
        }
    }

    /// Top hits per keyword, in keyword order, truncated to the game size.
    pub async fn find_waypoints(&self, location: &str, keywords: &[String]) -> Result<WaypointList> {
        let mut found = Vec::new();

        for keyword in keywords {
            if found.len() >= self.max_waypoints {
                break;
            }

            let search = NearbySearch::around(location, self.search_radius_m).with_keyword(keyword.as_str());
            let results = self.places.nearby_search(&search).await?;
            debug!("Keyword {:?} matched {} places", keyword, results.len());

            found.extend(results.into_iter().take(self.places_per_keyword).map(|place| Waypoint {
                name: place.name,
                place_id: place.place_id,
                coordinates: place.geometry.location.into(),
            }));
        }

        let waypoints = WaypointList::new(found, self.max_waypoints).map_err(|_| {
            Error::NoWaypointsFound(format!(
                "nothing matched {:?} within {} m of {}",
                keywords, self.search_radius_m, location
            ))
        })?;

        info!(
            "Planned {} waypoints: {}",
            waypoints.len(),
            waypoints.iter().map(|w| w.name.as_str()).collect::<Vec<_>>().join(" -> ")
        );

        Ok(waypoints)
    }

    /// Place id of the closest place to `location`
    pub async fn resolve_place_id(&self, location: &str) -> Result<String> {
        let search = NearbySearch::around(location, self.location_radius_m);
        self.places
            .nearby_search(&search)
            .await?
            .into_iter()
            .next()
            .map(|place| place.place_id)
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "no place within {} m of {}",
                    self.location_radius_m, location
                ))
            })
    }
}
