//! Configuration module - Modular configuration management
//!
//! - types/mod.rs: Core configuration types (Config, AgentConfig, etc.)
//! - types/provider.rs: Model and maps provider configuration
//! - types/game.rs: Game rules and session store settings
//! - io.rs: Configuration loading and saving
//! - validation.rs: Configuration validation
//! - paths.rs: Configuration file paths

mod io;
mod paths;
mod types;
mod validation;

// Re-export core config types
pub use types::{AgentConfig, Config, GatewayConfig, LogConfig, LogFormat};

// Re-export provider types
pub use types::provider::{MapsConfig, OpenAIConfig, ProviderConfig};

// Re-export game types
pub use types::game::{GameConfig, SessionConfig};

// Re-export IO and utilities
pub use io::{apply_env_overrides, load_config, load_config_from_path, save_config};
pub use paths::{config_dir, config_path};
pub use validation::{validate_config, ConfigValidationResult, ValidationIssue};
