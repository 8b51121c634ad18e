//! Provider configuration types
//!
//! Configuration for the upstream services: the chat-completions model and
//! the maps platform.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OpenAI-compatible chat completions endpoint
    #[serde(default)]
    pub openai: OpenAIConfig,
}

fn default_secret() -> SecretString {
    SecretString::from(String::new())
}

/// OpenAI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// API key
    #[serde(skip_serializing, default = "default_secret")]
    pub api_key: SecretString,
    /// Model used for keywords, riddles and hints
    #[serde(default = "default_openai_model")]
    pub default_model: String,
    /// Base URL
    #[serde(default = "default_openai_url")]
    pub base_url: String,
    /// Organization ID
    pub organization: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        OpenAIConfig {
            api_key: default_secret(),
            default_model: default_openai_model(),
            base_url: default_openai_url(),
            organization: None,
            timeout_secs: default_llm_timeout(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

/// Maps platform configuration (places, details, directions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// API key, sent as the `key` query parameter
    #[serde(skip_serializing, default = "default_secret")]
    pub api_key: SecretString,
    /// Base URL of the maps REST API
    #[serde(default = "default_maps_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_maps_timeout")]
    pub timeout_secs: u64,
}

impl Default for MapsConfig {
    fn default() -> Self {
        MapsConfig {
            api_key: default_secret(),
            base_url: default_maps_url(),
            timeout_secs: default_maps_timeout(),
        }
    }
}

fn default_maps_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_maps_timeout() -> u64 {
    60
}
