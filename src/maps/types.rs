//! Wire types for the maps REST API
//!
//! Only the fields the game reads are modelled; place details keep the rest
//! of the payload so hints can quote it.

use serde::{Deserialize, Serialize};

use crate::game::Coordinates;

/// `{lat, lng}` pair as the maps API writes it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(value: LatLng) -> Self {
        Coordinates::new(value.lat, value.lng)
    }
}

/// Geometry block of a place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// One nearby-search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub name: String,
    pub place_id: String,
    pub geometry: Geometry,
}

/// Parameters of a nearby search
#[derive(Debug, Clone)]
pub struct NearbySearch {
    /// `"lat,lng"` centre
    pub location: String,
    /// Radius in metres
    pub radius: u32,
    /// Optional keyword filter
    pub keyword: Option<String>,
}

impl NearbySearch {
    /// Search around a location without a keyword
    pub fn around(location: impl Into<String>, radius: u32) -> Self {
        NearbySearch {
            location: location.into(),
            radius,
            keyword: None,
        }
    }

    /// Restrict results to a keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

/// Place details payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    /// Every other field of the `result` object
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One step of a route leg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub end_location: LatLng,
}

/// A leg between two stops of a route
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leg {
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A candidate route from the directions endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
}

impl Route {
    /// End location of every step, across all legs, in travel order
    pub fn step_points(&self) -> Vec<LatLng> {
        self.legs
            .iter()
            .flat_map(|leg| leg.steps.iter().map(|step| step.end_location))
            .collect()
    }
}

/// Envelope of a nearby-search response
#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

/// Envelope of a place-details response
#[derive(Debug, Deserialize)]
pub(crate) struct PlaceDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

/// Envelope of a directions response
#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}
