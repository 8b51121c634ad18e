//! HTTP request/response types

use serde::{Deserialize, Serialize};

/// Body of `POST /ask`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    /// Free-text message
    #[serde(default)]
    pub data: Option<String>,
    /// Player location as "lat,lng"
    #[serde(default)]
    pub location: Option<String>,
    /// Base64 photo; accepted but not used
    #[serde(default)]
    pub image: Option<String>,
    /// Session to continue; a new one is allocated when absent
    #[serde(default)]
    pub session_id: Option<String>,
}

impl AskRequest {
    /// Message text handed to the agent, with the location folded in.
    ///
    /// `None` when neither text nor location is present.
    pub fn message(&self) -> Option<String> {
        let data = self.data.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let location = self.location.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (data, location) {
            (Some(data), Some(location)) => Some(format!("{} and my current location is {}", data, location)),
            (Some(data), None) => Some(data.to_string()),
            (None, Some(location)) => Some(format!("my current location is {}", location)),
            (None, None) => None,
        }
    }
}

/// Body returned by `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
    pub session_id: String,
    /// Game tool that produced the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

/// Body returned by `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
