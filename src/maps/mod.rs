//! Maps module - places index, place details and directions
//!
//! `PlacesProvider` is the seam the game logic depends on; `MapsClient` is
//! the HTTP implementation against the Google Maps Platform REST API.

mod client;
mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use client::MapsClient;
pub use types::{Geometry, LatLng, Leg, NearbySearch, PlaceDetails, PlaceResult, Route, Step};

/// Abstract interface to a places index
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Places around a location, optionally filtered by keyword
    async fn nearby_search(&self, search: &NearbySearch) -> Result<Vec<PlaceResult>>;

    /// Details of a single place
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails>;

    /// Candidate routes between two place ids
    async fn directions(&self, origin: &str, destination: &str) -> Result<Vec<Route>>;
}
