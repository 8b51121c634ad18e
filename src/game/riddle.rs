//! Riddle generator: route sights between two places woven into a riddle

use futures::future::try_join_all;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use super::waypoint::Coordinates;
use crate::agent::prompts::{PromptTemplate, RIDDLE_TEMPLATE};
use crate::agent::provider::{complete, LlmProvider};
use crate::error::{Error, Result};
use crate::maps::{NearbySearch, PlacesProvider};

/// Builds riddles whose answer is the destination place
#[derive(Clone)]
pub struct RiddleGenerator {
    places: Arc<dyn PlacesProvider>,
    llm: Arc<dyn LlmProvider>,
    template: Arc<PromptTemplate>,
    sight_radius_m: u32,
}

impl RiddleGenerator {
    pub fn new(places: Arc<dyn PlacesProvider>, llm: Arc<dyn LlmProvider>, sight_radius_m: u32) -> Result<Self> {
        Ok(RiddleGenerator {
            places,
            llm,
            template: Arc::new(PromptTemplate::new("riddle", RIDDLE_TEMPLATE)?),
            sight_radius_m,
        })
    }

    /// Riddle leading from place `start` to place `end`
    pub async fn generate(&self, start: &str, end: &str) -> Result<String> {
        let sights = self.sights_between(start, end).await?;

        let (start_name, end_name) = futures::try_join!(self.display_name(start), self.display_name(end))?;

        debug!(
            "Riddle {} -> {} with {} sights",
            start_name,
            end_name,
            sights.len()
        );

        let prompt = self.template.render(&json!({
            "start": start_name,
            "destination": end_name,
            "sights": sights,
        }))?;

        complete(self.llm.as_ref(), &prompt).await
    }

    /// Names of places next to each step of the first route, in travel order
    pub async fn sights_between(&self, start: &str, end: &str) -> Result<Vec<String>> {
        let routes = self.places.directions(start, end).await?;
        let route = routes
            .first()
            .ok_or_else(|| Error::NotFound(format!("no route from {} to {}", start, end)))?;

        let lookups = route.step_points().into_iter().map(|point| {
            let search = NearbySearch::around(Coordinates::from(point).to_string(), self.sight_radius_m);
            async move { self.places.nearby_search(&search).await }
        });

        let mut sights: Vec<String> = Vec::new();
        for place in try_join_all(lookups).await?.into_iter().flatten() {
            if !place.name.is_empty() && !sights.contains(&place.name) {
                sights.push(place.name);
            }
        }

        Ok(sights)
    }

    async fn display_name(&self, place_id: &str) -> Result<String> {
        let details = self.places.place_details(place_id).await?;
        Ok(details.name.unwrap_or_else(|| "unknown".to_string()))
    }
}
