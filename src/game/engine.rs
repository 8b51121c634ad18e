//! Game engine: start, verify and hint over a player session

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::hint::HintGenerator;
use super::keywords::KeywordDeriver;
use super::places::PlaceLookup;
use super::riddle::RiddleGenerator;
use super::session::{GameSession, Progress, Rules};
use super::store::PlayerSession;
use super::waypoint::Coordinates;
use crate::agent::provider::LlmProvider;
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::maps::PlacesProvider;

/// Reply when the final target is reached
pub const COMPLETION_MESSAGE: &str =
    "Congratulations! You have reached the destination. You have successfully completed the game.";

/// Reply when a check-in misses the target
pub const INCORRECT_MESSAGE: &str =
    "Sorry, the answer is incorrect. Please try again. You can also ask for a hint if you need one.";

/// Result of a `verify` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Target reached, here is the riddle for the next one
    NextRiddle(String),
    Completed,
    Incorrect,
}

impl VerifyOutcome {
    /// Text shown to the player
    pub fn message(&self) -> &str {
        match self {
            VerifyOutcome::NextRiddle(riddle) => riddle,
            VerifyOutcome::Completed => COMPLETION_MESSAGE,
            VerifyOutcome::Incorrect => INCORRECT_MESSAGE,
        }
    }
}

/// Runs games against shared maps and model clients
#[derive(Clone)]
pub struct GameEngine {
    lookup: PlaceLookup,
    keywords: KeywordDeriver,
    riddles: RiddleGenerator,
    hints: HintGenerator,
    rules: Rules,
}

impl GameEngine {
    pub fn new(places: Arc<dyn PlacesProvider>, llm: Arc<dyn LlmProvider>, config: &GameConfig) -> Result<Self> {
        Ok(GameEngine {
            lookup: PlaceLookup::new(places.clone(), config),
            keywords: KeywordDeriver::new(llm.clone())?,
            riddles: RiddleGenerator::new(places.clone(), llm.clone(), config.sight_radius_m)?,
            hints: HintGenerator::new(places, llm)?,
            rules: Rules::from(config),
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Plan a new game around `location` and return the first riddle.
    ///
    /// Any previous game in the session is replaced.
    pub async fn start(&self, session: &mut PlayerSession, location: &str, interests: &str) -> Result<String> {
        let origin: Coordinates = location.parse()?;
        if interests.trim().is_empty() {
            return Err(Error::InvalidInput("Interests must not be empty".to_string()));
        }

        let started_at = Utc::now();
        let location = origin.to_string();

        let keywords = self.keywords.derive(interests).await?;
        let waypoints = self.lookup.find_waypoints(&location, &keywords).await?;
        let origin_place_id = self.lookup.resolve_place_id(&location).await?;

        let game = GameSession::new(waypoints, origin_place_id, started_at);
        let riddle = self
            .riddles
            .generate(game.origin_place_id(), &game.target().place_id)
            .await?;

        info!(
            "Game started for session {} with {} waypoints",
            session.conversation.session_id,
            game.waypoints().len()
        );
        session.game = Some(game);

        Ok(riddle)
    }

    /// Check the player in at `location`
    pub async fn verify(&self, session: &mut PlayerSession, location: &str) -> Result<VerifyOutcome> {
        let game = session.game.as_mut().ok_or(Error::NoActiveGame)?;
        if game.is_completed() {
            return Err(Error::GameFinished);
        }
        let now = Utc::now();
        game.check_timeout(now, &self.rules)?;
        let at: Coordinates = location.parse()?;

        match game.check_in(at, now, &self.rules)? {
            Progress::Missed => Ok(VerifyOutcome::Incorrect),
            Progress::Completed => {
                info!("Game completed for session {}", session.conversation.session_id);
                Ok(VerifyOutcome::Completed)
            }
            Progress::Advanced { from, to } => {
                let waypoints = game.waypoints();
                let riddle = self
                    .riddles
                    .generate(&waypoints[from].place_id, &waypoints[to].place_id)
                    .await?;
                Ok(VerifyOutcome::NextRiddle(riddle))
            }
        }
    }

    /// Clue about the current target
    pub async fn hint(&self, session: &mut PlayerSession) -> Result<String> {
        let game = session.game.as_mut().ok_or(Error::NoActiveGame)?;
        game.check_hint_budget(&self.rules)?;

        let hint = self.hints.generate(game.target()).await?;
        game.record_hint();
        Ok(hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::waypoint::{waypoint, WaypointList};
    use crate::testing::{FakeLlm, FakePlaces};

    /// Answers keyword prompts with museums and parks, everything else with
    /// a fixed line.
    fn llm() -> Arc<FakeLlm> {
        Arc::new(FakeLlm::replying(|prompt| {
            if prompt.contains("The interests are") {
                "museum, park".to_string()
            } else if prompt.contains("Build a riddle") {
                "Where old things rest and children play.".to_string()
            } else {
                "Look for the tall columns.".to_string()
            }
        }))
    }

    fn places() -> FakePlaces {
        FakePlaces::new()
            .with_keyword("museum", &[("M1", 10.0), ("M2", 20.0), ("M3", 30.0)])
            .with_keyword("park", &[("P1", 40.0), ("P2", 50.0)])
            .with_origin("origin-place")
            .with_route(&[(1.0, -75.0)])
            .with_sight("1,-75", "Fountain")
    }

    fn engine_with(llm: Arc<FakeLlm>, config: &GameConfig) -> GameEngine {
        GameEngine::new(Arc::new(places()), llm, config).unwrap()
    }

    fn session() -> PlayerSession {
        PlayerSession::new("test-session", 20)
    }

    #[tokio::test]
    async fn test_museums_and_parks_game() {
        let llm = llm();
        let engine = engine_with(llm.clone(), &GameConfig::default());
        let mut session = session();

        let riddle = engine.start(&mut session, "0.0,-75.0", "museums, parks").await.unwrap();
        assert_eq!(riddle, "Where old things rest and children play.");

        let game = session.game.as_ref().unwrap();
        let names: Vec<_> = game.waypoints().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["M1", "M2", "P1", "P2"]);
        assert_eq!(game.target_index(), 0);
        assert_eq!(game.origin_place_id(), "origin-place");

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("The start location is Origin"));
        assert!(prompt.contains("the destination is M1."));
        assert!(prompt.contains("Fountain"));

        let outcome = engine.verify(&mut session, "10.0,-75.0").await.unwrap();
        assert!(matches!(outcome, VerifyOutcome::NextRiddle(_)));
        assert_eq!(session.game.as_ref().unwrap().target_index(), 1);
        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("The start location is M1"));
        assert!(prompt.contains("the destination is M2."));

        let outcome = engine.verify(&mut session, "-30.0,100.0").await.unwrap();
        assert_eq!(outcome, VerifyOutcome::Incorrect);
        assert_eq!(outcome.message(), INCORRECT_MESSAGE);
        assert_eq!(session.game.as_ref().unwrap().target_index(), 1);

        assert!(matches!(
            engine.verify(&mut session, "20.0,-75.0").await.unwrap(),
            VerifyOutcome::NextRiddle(_)
        ));

        let outcome = engine.verify(&mut session, "40.0,-75.0").await.unwrap();
        assert_eq!(outcome, VerifyOutcome::Completed);
        assert_eq!(outcome.message(), COMPLETION_MESSAGE);

        assert!(matches!(
            engine.verify(&mut session, "50.0,-75.0").await,
            Err(Error::GameFinished)
        ));
    }

    #[tokio::test]
    async fn test_start_rejects_bad_input_before_any_lookup() {
        let llm = llm();
        let engine = engine_with(llm.clone(), &GameConfig::default());
        let mut session = session();

        assert!(matches!(
            engine.start(&mut session, "0.0,-75.0", "  ").await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            engine.start(&mut session, "somewhere nice", "museums").await,
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(llm.request_count(), 0);
        assert!(session.game.is_none());
    }

    #[tokio::test]
    async fn test_start_with_no_matches_leaves_session_empty() {
        let llm = Arc::new(FakeLlm::replying(|_| "volcano".to_string()));
        let engine = engine_with(llm, &GameConfig::default());
        let mut session = session();

        assert!(matches!(
            engine.start(&mut session, "0.0,-75.0", "volcanoes").await,
            Err(Error::NoWaypointsFound(_))
        ));
        assert!(session.game.is_none());
    }

    #[tokio::test]
    async fn test_restart_replaces_game() {
        let engine = engine_with(llm(), &GameConfig::default());
        let mut session = session();

        engine.start(&mut session, "0.0,-75.0", "museums, parks").await.unwrap();
        engine.verify(&mut session, "10.0,-75.0").await.unwrap();
        assert_eq!(session.game.as_ref().unwrap().target_index(), 1);

        engine.start(&mut session, "0.0,-75.0", "museums, parks").await.unwrap();
        assert_eq!(session.game.as_ref().unwrap().target_index(), 0);
    }

    #[tokio::test]
    async fn test_verify_and_hint_need_a_game() {
        let engine = engine_with(llm(), &GameConfig::default());
        let mut session = session();

        assert!(matches!(
            engine.verify(&mut session, "0.0,0.0").await,
            Err(Error::NoActiveGame)
        ));
        assert!(matches!(engine.hint(&mut session).await, Err(Error::NoActiveGame)));
    }

    #[tokio::test]
    async fn test_verify_rejects_place_names() {
        let engine = engine_with(llm(), &GameConfig::default());
        let mut session = session();
        engine.start(&mut session, "0.0,-75.0", "museums").await.unwrap();

        assert!(matches!(
            engine.verify(&mut session, "the museum").await,
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(session.game.as_ref().unwrap().target_index(), 0);
    }

    #[tokio::test]
    async fn test_timed_out_game_reports_progress() {
        let engine = engine_with(llm(), &GameConfig::default());
        let mut session = session();
        let list = WaypointList::new(
            vec![waypoint("A", 10.0, -75.0), waypoint("B", 20.0, -75.0), waypoint("C", 30.0, -75.0)],
            5,
        )
        .unwrap();
        session.game = Some(GameSession::new(list, "origin-place", Utc::now() - chrono::Duration::hours(2)));

        for _ in 0..2 {
            match engine.verify(&mut session, "10.0,-75.0").await {
                Err(err @ Error::SessionTimeout { reached: 0 }) => {
                    assert!(err.to_string().contains("You have covered 0 points."));
                }
                other => panic!("expected timeout, got {:?}", other),
            }
        }
        assert_eq!(session.game.as_ref().unwrap().target_index(), 0);
    }

    #[tokio::test]
    async fn test_timeout_wins_over_unparseable_location() {
        let engine = engine_with(llm(), &GameConfig::default());
        let mut session = session();
        let list = WaypointList::new(vec![waypoint("A", 10.0, -75.0), waypoint("B", 20.0, -75.0)], 5).unwrap();
        session.game = Some(GameSession::new(list, "origin-place", Utc::now() - chrono::Duration::hours(2)));

        assert!(matches!(
            engine.verify(&mut session, "City Hall").await,
            Err(Error::SessionTimeout { reached: 0 })
        ));
        assert_eq!(session.game.as_ref().unwrap().target_index(), 0);
        assert!(!session.game.as_ref().unwrap().is_completed());
    }

    #[tokio::test]
    async fn test_search_radii() {
        let places = Arc::new(places());
        let engine = GameEngine::new(places.clone(), llm(), &GameConfig::default()).unwrap();
        let mut session = session();
        engine.start(&mut session, "0.0,-75.0", "museums, parks").await.unwrap();

        let searches = places.searches();
        let seen: Vec<_> = searches
            .iter()
            .map(|s| (s.location.as_str(), s.radius, s.keyword.as_deref()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("0,-75", 1000, Some("museum")),
                ("0,-75", 1000, Some("park")),
                ("0,-75", 50, None),
                ("1,-75", 10, None),
            ]
        );
    }

    #[tokio::test]
    async fn test_hints_count_against_limit() {
        let llm = llm();
        let config = GameConfig {
            max_hints: Some(2),
            ..GameConfig::default()
        };
        let engine = engine_with(llm.clone(), &config);
        let mut session = session();
        engine.start(&mut session, "0.0,-75.0", "museums").await.unwrap();

        for _ in 0..2 {
            assert_eq!(engine.hint(&mut session).await.unwrap(), "Look for the tall columns.");
        }
        assert!(llm.last_prompt().unwrap().contains("the destination is M1."));
        assert_eq!(session.game.as_ref().unwrap().hints_used(), 2);

        assert!(matches!(
            engine.hint(&mut session).await,
            Err(Error::HintLimitReached { limit: 2 })
        ));
    }
}
