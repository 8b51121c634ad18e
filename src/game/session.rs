//! Per-game progress state machine
//!
//! A `GameSession` walks a fixed `WaypointList` one target at a time. It
//! knows nothing about maps or models: the engine feeds it a location and the
//! current time and acts on the returned `Progress`.
//!
//! Completion fires when the target index reaches the last waypoint, which
//! means the final waypoint itself is never checked in at. Games have always
//! ended this way, so the rule is kept as is.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use super::waypoint::{Coordinates, Waypoint, WaypointList};
use crate::config::GameConfig;
use crate::error::{Error, Result};

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Completed,
}

/// Outcome of a check-in at the current target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Target reached, play continues from `from` to `to`
    Advanced { from: usize, to: usize },
    /// Target reached and the game is over
    Completed,
    /// Not close enough, nothing changed
    Missed,
}

/// Rules a session is checked against
#[derive(Debug, Clone)]
pub struct Rules {
    pub tolerance_deg: f64,
    pub timeout: Duration,
    pub max_hints: Option<u32>,
}

impl From<&GameConfig> for Rules {
    fn from(config: &GameConfig) -> Self {
        Rules {
            tolerance_deg: config.tolerance_deg,
            timeout: config.timeout,
            max_hints: config.max_hints,
        }
    }
}

/// State of one game
#[derive(Debug, Clone, Serialize)]
pub struct GameSession {
    waypoints: WaypointList,
    target_index: usize,
    started_at: DateTime<Utc>,
    origin_place_id: String,
    hints_used: u32,
    status: GameStatus,
}

impl GameSession {
    /// A fresh game aimed at the first waypoint
    pub fn new(waypoints: WaypointList, origin_place_id: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        GameSession {
            waypoints,
            target_index: 0,
            started_at,
            origin_place_id: origin_place_id.into(),
            hints_used: 0,
            status: GameStatus::InProgress,
        }
    }

    pub fn waypoints(&self) -> &WaypointList {
        &self.waypoints
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// The waypoint the player is looking for
    pub fn target(&self) -> &Waypoint {
        &self.waypoints[self.target_index]
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn origin_place_id(&self) -> &str {
        &self.origin_place_id
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    /// Time since start; a clock that went backwards counts as zero
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or_default()
    }

    /// `SessionTimeout` once the game has run longer than the rules allow
    pub fn check_timeout(&self, now: DateTime<Utc>, rules: &Rules) -> Result<()> {
        if self.elapsed(now) > rules.timeout {
            return Err(Error::SessionTimeout {
                reached: self.target_index,
            });
        }
        Ok(())
    }

    /// Check the player in at `at`.
    ///
    /// A timed-out game yields `SessionTimeout` and is left untouched, so the
    /// same answer comes back on every later call.
    pub fn check_in(&mut self, at: Coordinates, now: DateTime<Utc>, rules: &Rules) -> Result<Progress> {
        if self.is_completed() {
            return Err(Error::GameFinished);
        }
        self.check_timeout(now, rules)?;

        if !at.within(&self.target().coordinates, rules.tolerance_deg) {
            return Ok(Progress::Missed);
        }

        let from = self.target_index;
        let next = from + 1;
        let last = self.waypoints.len() - 1;

        if next >= last {
            self.target_index = next.min(last);
            self.status = GameStatus::Completed;
            Ok(Progress::Completed)
        } else {
            self.target_index = next;
            Ok(Progress::Advanced { from, to: next })
        }
    }

    /// Fails once the configured hint budget is spent.
    pub fn check_hint_budget(&self, rules: &Rules) -> Result<()> {
        if self.is_completed() {
            return Err(Error::GameFinished);
        }
        match rules.max_hints {
            Some(limit) if self.hints_used >= limit => Err(Error::HintLimitReached { limit }),
            _ => Ok(()),
        }
    }

    pub fn record_hint(&mut self) {
        self.hints_used += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::waypoint::waypoint;

    fn rules() -> Rules {
        Rules {
            tolerance_deg: 2.0,
            timeout: Duration::from_secs(3600),
            max_hints: None,
        }
    }

    /// Waypoints ten degrees apart so the default tolerance separates them.
    fn session(len: usize) -> GameSession {
        let list = WaypointList::new(
            (0..len).map(|i| waypoint(&format!("Stop {}", i), 10.0 * i as f64, -75.0)),
            5,
        )
        .unwrap();
        GameSession::new(list, "origin", Utc::now())
    }

    fn at_target(game: &GameSession) -> Coordinates {
        game.target().coordinates
    }

    #[test]
    fn test_exact_location_advances() {
        let mut game = session(4);
        let now = game.started_at();
        let progress = game.check_in(at_target(&game), now, &rules()).unwrap();

        assert_eq!(progress, Progress::Advanced { from: 0, to: 1 });
        assert_eq!(game.target_index(), 1);
        assert_eq!(game.target().name, "Stop 1");
    }

    #[test]
    fn test_out_of_tolerance_on_either_axis_misses() {
        let mut game = session(4);
        let now = game.started_at();

        let off_lat = Coordinates::new(2.5, -75.0);
        let off_lng = Coordinates::new(0.0, -77.5);
        assert_eq!(game.check_in(off_lat, now, &rules()).unwrap(), Progress::Missed);
        assert_eq!(game.check_in(off_lng, now, &rules()).unwrap(), Progress::Missed);
        assert_eq!(game.target_index(), 0);
    }

    #[test]
    fn test_index_is_monotonic_and_steps_by_one() {
        let mut game = session(5);
        let now = game.started_at();
        let far = Coordinates::new(-60.0, 100.0);
        let mut previous = game.target_index();

        for round in 0..12 {
            let at = if round % 3 == 0 { far } else { at_target(&game) };
            match game.check_in(at, now, &rules()) {
                Ok(_) | Err(Error::GameFinished) => {}
                Err(e) => panic!("unexpected error: {}", e),
            }
            let index = game.target_index();
            assert!(index == previous || index == previous + 1);
            previous = index;
        }
    }

    #[test]
    fn test_completion_on_reaching_second_to_last_target() {
        let mut game = session(4);
        let now = game.started_at();

        assert!(matches!(game.check_in(at_target(&game), now, &rules()), Ok(Progress::Advanced { .. })));
        assert!(matches!(game.check_in(at_target(&game), now, &rules()), Ok(Progress::Advanced { from: 1, to: 2 })));
        assert_eq!(game.check_in(at_target(&game), now, &rules()).unwrap(), Progress::Completed);

        assert_eq!(game.target_index(), 3);
        assert!(game.is_completed());
        assert!(matches!(
            game.check_in(at_target(&game), now, &rules()),
            Err(Error::GameFinished)
        ));
    }

    #[test]
    fn test_two_waypoints_complete_on_first_check_in() {
        let mut game = session(2);
        let now = game.started_at();
        assert_eq!(game.check_in(at_target(&game), now, &rules()).unwrap(), Progress::Completed);
        assert_eq!(game.target_index(), 1);
    }

    #[test]
    fn test_single_waypoint_keeps_index_in_bounds() {
        let mut game = session(1);
        let now = game.started_at();
        assert_eq!(game.check_in(at_target(&game), now, &rules()).unwrap(), Progress::Completed);
        assert_eq!(game.target_index(), 0);
    }

    #[test]
    fn test_timeout_ignores_location_and_keeps_state() {
        let mut game = session(4);
        let start = game.started_at();
        game.check_in(at_target(&game), start, &rules()).unwrap();

        let late = start + chrono::Duration::seconds(3601);
        for _ in 0..2 {
            match game.check_in(at_target(&game), late, &rules()) {
                Err(Error::SessionTimeout { reached }) => assert_eq!(reached, 1),
                other => panic!("expected timeout, got {:?}", other),
            }
        }
        assert_eq!(game.target_index(), 1);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_check_timeout_is_read_only() {
        let game = session(3);
        let start = game.started_at();

        assert!(game.check_timeout(start + chrono::Duration::seconds(3600), &rules()).is_ok());
        assert!(matches!(
            game.check_timeout(start + chrono::Duration::seconds(3601), &rules()),
            Err(Error::SessionTimeout { reached: 0 })
        ));
        assert_eq!(game.target_index(), 0);
    }

    #[test]
    fn test_exactly_at_timeout_still_plays() {
        let mut game = session(4);
        let at_limit = game.started_at() + chrono::Duration::seconds(3600);
        assert!(game.check_in(at_target(&game), at_limit, &rules()).is_ok());
    }

    #[test]
    fn test_degenerate_tolerance_accepts_nearby_fix() {
        let list = WaypointList::new(
            vec![waypoint("A", 40.0, -75.0), waypoint("B", 41.0, -74.0), waypoint("C", 50.0, -60.0)],
            5,
        )
        .unwrap();
        let mut game = GameSession::new(list, "origin", Utc::now());
        let at: Coordinates = "40.0001,-75.0001".parse().unwrap();

        let progress = game.check_in(at, game.started_at(), &rules()).unwrap();
        assert_eq!(progress, Progress::Advanced { from: 0, to: 1 });
    }

    #[test]
    fn test_hint_budget() {
        let mut game = session(3);
        let limited = Rules {
            max_hints: Some(1),
            ..rules()
        };

        assert!(game.check_hint_budget(&limited).is_ok());
        game.record_hint();
        assert!(matches!(
            game.check_hint_budget(&limited),
            Err(Error::HintLimitReached { limit: 1 })
        ));
        assert!(game.check_hint_budget(&rules()).is_ok());
    }
}
