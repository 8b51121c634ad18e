//! # RiddleQuest
//!
//! A location-based riddle game served over HTTP.
//!
//! ## Features
//!
//! - **Interest-driven routes:** the player's interests become map searches
//!   and the hits become the waypoints of a walk
//! - **Model-written riddles:** each riddle is built from sights along the
//!   route to the next waypoint
//! - **Tool-calling agent:** free-text messages are routed to start, verify
//!   or hint through chat-completion tool calls
//! - **Isolated sessions:** every player gets their own game and history

pub mod agent;
pub mod config;
pub mod error;
pub mod game;
pub mod gateway;
pub mod maps;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
