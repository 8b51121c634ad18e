//! Hint generator

use serde_json::json;
use std::sync::Arc;

use super::waypoint::Waypoint;
use crate::agent::prompts::{PromptTemplate, HINT_TEMPLATE};
use crate::agent::provider::{complete, LlmProvider};
use crate::error::Result;
use crate::maps::PlacesProvider;

/// One-sentence clues about the current target
#[derive(Clone)]
pub struct HintGenerator {
    places: Arc<dyn PlacesProvider>,
    llm: Arc<dyn LlmProvider>,
    template: Arc<PromptTemplate>,
}

impl HintGenerator {
    pub fn new(places: Arc<dyn PlacesProvider>, llm: Arc<dyn LlmProvider>) -> Result<Self> {
        Ok(HintGenerator {
            places,
            llm,
            template: Arc::new(PromptTemplate::new("hint", HINT_TEMPLATE)?),
        })
    }

    pub async fn generate(&self, target: &Waypoint) -> Result<String> {
        let details = self.places.place_details(&target.place_id).await?;
        let prompt = self.template.render(&json!({
            "target": target.name,
            "details": serde_json::to_string(&details)?,
        }))?;

        complete(self.llm.as_ref(), &prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::waypoint::Coordinates;
    use crate::testing::{FakeLlm, FakePlaces};

    #[tokio::test]
    async fn test_hint_prompt_carries_target_details() {
        let places = FakePlaces::new().with_keyword("zoo", &[("City Zoo", 39.9)]);
        let llm = Arc::new(FakeLlm::replying(|_| "Listen for the lions.".to_string()));
        let hints = HintGenerator::new(Arc::new(places), llm.clone()).unwrap();

        let target = Waypoint {
            name: "City Zoo".to_string(),
            place_id: "id-City Zoo".to_string(),
            coordinates: Coordinates::new(39.9, -75.0),
        };

        assert_eq!(hints.generate(&target).await.unwrap(), "Listen for the lions.");

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("the destination is City Zoo."));
        assert!(prompt.contains(r#""vicinity":"1 City Zoo Way""#));
    }
}
