//! Game module - waypoint planning, riddles, hints and per-player state
//!
//! - waypoint.rs: coordinates and the fixed waypoint list of a game
//! - session.rs: progress state machine for one game
//! - places.rs / keywords.rs: turning interests into waypoints
//! - riddle.rs / hint.rs: model-written clues
//! - engine.rs: start, verify and hint over a player session
//! - store.rs: sessions keyed by id

mod engine;
mod hint;
mod keywords;
mod places;
mod riddle;
mod session;
mod store;
mod waypoint;

pub use engine::{GameEngine, VerifyOutcome, COMPLETION_MESSAGE, INCORRECT_MESSAGE};
pub use hint::HintGenerator;
pub use keywords::{parse_keywords, KeywordDeriver};
pub use places::PlaceLookup;
pub use riddle::RiddleGenerator;
pub use session::{GameSession, GameStatus, Progress, Rules};
pub use store::{PlayerSession, SessionHandle, SessionStore};
pub use waypoint::{Coordinates, Waypoint, WaypointList};
