//! Configuration I/O - Loading and saving configuration
//!
//! Handles reading configuration from files and environment variables.

use std::path::Path;

use super::types::Config;
use crate::error::{Error, Result};

/// Load configuration with layered precedence:
/// 1. Config file if it exists, otherwise defaults
/// 2. Environment variable overrides (includes .env)
pub fn load_config() -> Result<Config> {
    let config_path = super::paths::config_path();

    let mut config = if config_path.exists() {
        load_config_from_path(&config_path)?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    // Detect format by extension
    let config: Config = if path.extension().map_or(false, |ext| ext == "json") {
        json5::from_str(&content).map_err(|e| Error::Config(format!("Invalid JSON config: {}", e)))?
    } else if path.extension().map_or(false, |ext| ext == "toml") {
        toml::from_str(&content).map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))?
    } else {
        // Try JSON5 first, then TOML
        json5::from_str(&content)
            .or_else(|_| toml::from_str(&content).map_err(|e| Error::Config(e.to_string())))
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?
    };

    Ok(config)
}

/// Apply environment variable overrides to an existing config.
///
/// Loads `.env` first, then overlays any set variable. Env vars have the
/// highest precedence: defaults < file < env.
pub fn apply_env_overrides(config: &mut Config) {
    use secrecy::SecretString;

    dotenvy::dotenv().ok();

    // Model provider
    if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
        config.provider.openai.api_key = SecretString::from(api_key);
    }
    if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
        config.provider.openai.base_url = url;
    }
    if let Ok(model) = std::env::var("OPENAI_MODEL") {
        config.provider.openai.default_model = model;
    }
    if let Ok(org) = std::env::var("OPENAI_ORGANIZATION") {
        config.provider.openai.organization = Some(org);
    }

    // Maps
    if let Ok(api_key) = std::env::var("MAPS_API_KEY") {
        config.maps.api_key = SecretString::from(api_key);
    }
    if let Ok(url) = std::env::var("MAPS_BASE_URL") {
        config.maps.base_url = url;
    }

    // Agent
    if let Ok(model) = std::env::var("AGENT_MODEL") {
        config.agent.model = model;
    }

    // Game rules
    if let Ok(timeout) = std::env::var("GAME_TIMEOUT") {
        if let Ok(v) = humantime_serde::re::humantime::parse_duration(&timeout) {
            config.game.timeout = v;
        }
    }
    if let Ok(tolerance) = std::env::var("GAME_TOLERANCE") {
        if let Ok(v) = tolerance.parse() {
            config.game.tolerance_deg = v;
        }
    }
    if let Ok(max_hints) = std::env::var("GAME_MAX_HINTS") {
        config.game.max_hints = max_hints.parse().ok();
    }

    // Gateway
    if let Ok(bind) = std::env::var("GATEWAY_BIND") {
        config.gateway.bind = bind;
    }
    if let Ok(port) = std::env::var("GATEWAY_PORT") {
        if let Ok(port) = port.parse() {
            config.gateway.port = port;
        }
    }

    // Logging
    if let Ok(level) = std::env::var("RUST_LOG") {
        config.log.level = level;
    }
    if let Ok(format) = std::env::var("LOG_FORMAT") {
        if let Ok(format) = format.parse() {
            config.log.format = format;
        }
    }
}

/// Save configuration to a file
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let content = if path.extension().map_or(false, |ext| ext == "toml") {
        toml::to_string_pretty(config).map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?
    } else {
        serde_json::to_string_pretty(config).map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, content)?;
    Ok(())
}
