//! Tool/function calling support
//!
//! The agent exposes three game operations to the model. Parameter schemas
//! are derived from the argument structs so the two never drift apart.

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agent::types::{AssistantToolCall, FunctionDefinition, ToolDefinition};
use crate::error::{Error, Result};

/// Arguments of `start_game`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StartGameArgs {
    /// The user's current location as "latitude,longitude"
    pub current_location: String,
    /// What the user is interested in, e.g. "museums, parks"
    pub user_interests: String,
}

/// Arguments of `verify`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VerifyArgs {
    /// The user's current location as "latitude,longitude"
    pub current_location: String,
}

/// Tools offered to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameTool {
    StartGame,
    Verify,
    GetHint,
}

impl GameTool {
    pub const ALL: [GameTool; 3] = [GameTool::StartGame, GameTool::Verify, GameTool::GetHint];

    /// Get the tool name
    pub fn name(&self) -> &'static str {
        match self {
            GameTool::StartGame => "start_game",
            GameTool::Verify => "verify",
            GameTool::GetHint => "get_hint",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// Get the tool description
    pub fn description(&self) -> &'static str {
        match self {
            GameTool::StartGame => {
                "Start a new game for the user. Requires the user's current location and their interests."
            }
            GameTool::Verify => {
                "Check whether the user's current location is the answer to the current riddle. \
                 Call this when the user says they have arrived or guesses the place."
            }
            GameTool::GetHint => "Give the user a hint about the current riddle's destination.",
        }
    }

    /// Get the JSON Schema for tool parameters
    pub fn parameters_schema(&self) -> Value {
        match self {
            GameTool::StartGame => schema_value::<StartGameArgs>(),
            GameTool::Verify => schema_value::<VerifyArgs>(),
            GameTool::GetHint => serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    /// Convert to a chat-completions tool definition
    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: self.parameters_schema(),
            },
        }
    }

    /// Definitions of every game tool
    pub fn definitions() -> Vec<ToolDefinition> {
        Self::ALL.iter().map(GameTool::to_definition).collect()
    }
}

/// Root schema without the draft and title keys the API does not need
fn schema_value<T: JsonSchema>() -> Value {
    let mut value = serde_json::to_value(schema_for!(T)).unwrap_or_default();
    if let Some(object) = value.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
    }
    value
}

/// A tool call request from the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool call ID
    pub id: String,
    /// Tool name
    pub name: String,
    /// Tool arguments as JSON
    pub arguments: Value,
}

impl ToolCall {
    /// Decode the raw call; an empty argument string counts as `{}`
    pub fn from_assistant(call: &AssistantToolCall) -> Result<Self> {
        let raw = call.function.arguments.trim();
        let arguments = if raw.is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(raw)
                .map_err(|e| Error::InvalidInput(format!("Malformed tool arguments: {}", e)))?
        };

        Ok(ToolCall {
            id: call.id.clone(),
            name: call.function.name.clone(),
            arguments,
        })
    }

    /// Parse arguments into a specific type
    pub fn parse_arguments<T: for<'de> Deserialize<'de>>(&self) -> Result<T> {
        serde_json::from_value(self.arguments.clone())
            .map_err(|e| Error::InvalidInput(format!("Invalid tool arguments: {}", e)))
    }
}
