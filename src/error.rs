//! Error types for RiddleQuest

use thiserror::Error;

/// Result type alias using RiddleQuest's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for RiddleQuest
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A maps or model service answered with a failure
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The place search produced nothing to build a game from
    #[error("No waypoints found: {0}")]
    NoWaypointsFound(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The game clock ran out
    #[error("The time has run out. You have taken too long to complete the game. You have covered {reached} points.")]
    SessionTimeout {
        /// Number of waypoints reached before time ran out
        reached: usize,
    },

    /// No game has been started for this session
    #[error("No game in progress. Start a game first by telling me your interests and location.")]
    NoActiveGame,

    /// The game has already been completed
    #[error("This game is already complete. Start a new game to play again.")]
    GameFinished,

    /// The configured hint budget is spent
    #[error("No hints left: the limit of {limit} hints for this game has been reached.")]
    HintLimitReached {
        /// Configured maximum
        limit: u32,
    },

    /// Upstream rejected our credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Check if the error came from a third-party service
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::UpstreamUnavailable(_) | Error::Http(_) | Error::Unauthorized(_)
        )
    }

    /// Check if error is a client error (user's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::NoWaypointsFound(_)
                | Error::NotFound(_)
                | Error::NoActiveGame
                | Error::GameFinished
                | Error::HintLimitReached { .. }
        )
    }

    /// Short machine-readable name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::UpstreamUnavailable(_) | Error::Http(_) => "upstream_unavailable",
            Error::Json(_) => "json",
            Error::Io(_) => "io",
            Error::InvalidInput(_) => "invalid_input",
            Error::NoWaypointsFound(_) => "no_waypoints_found",
            Error::NotFound(_) => "not_found",
            Error::SessionTimeout { .. } => "session_timeout",
            Error::NoActiveGame => "no_active_game",
            Error::GameFinished => "game_finished",
            Error::HintLimitReached { .. } => "hint_limit_reached",
            Error::Unauthorized(_) => "unauthorized",
            Error::Internal(_) => "internal",
        }
    }
}

impl From<handlebars::RenderError> for Error {
    fn from(err: handlebars::RenderError) -> Self {
        Error::Internal(format!("Template render error: {}", err))
    }
}
