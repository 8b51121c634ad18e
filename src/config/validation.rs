//! Configuration validation
//!
//! Validates configuration and reports issues.

use secrecy::ExposeSecret;

use super::types::Config;

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ConfigValidationResult {
    /// Whether the config is valid
    pub valid: bool,
    /// Validation errors (critical)
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings (non-critical)
    pub warnings: Vec<ValidationIssue>,
}

impl ConfigValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        ConfigValidationResult {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn with_error(mut self, issue: ValidationIssue) -> Self {
        self.valid = false;
        self.errors.push(issue);
        self
    }

    /// Add a warning
    pub fn with_warning(mut self, issue: ValidationIssue) -> Self {
        self.warnings.push(issue);
        self
    }
}

/// A validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the config field
    pub path: String,
    /// Issue message
    pub message: String,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new issue
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        Ok(())
    }
}

/// Validate the configuration
pub fn validate_config(config: &Config) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::valid();

    result = validate_provider_config(config, result);
    result = validate_maps_config(config, result);
    result = validate_game_config(config, result);

    result
}

fn validate_provider_config(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    let openai = &config.provider.openai;

    if openai.api_key.expose_secret().is_empty() {
        result = result.with_error(
            ValidationIssue::new("provider.openai.api_key", "No model API key configured")
                .with_suggestion("Set the OPENAI_API_KEY environment variable"),
        );
    }

    if url::Url::parse(&openai.base_url).is_err() {
        result = result.with_error(ValidationIssue::new(
            "provider.openai.base_url",
            format!("Not a valid URL: {}", openai.base_url),
        ));
    }

    result
}

fn validate_maps_config(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    if config.maps.api_key.expose_secret().is_empty() {
        result = result.with_error(
            ValidationIssue::new("maps.api_key", "No maps API key configured")
                .with_suggestion("Set the MAPS_API_KEY environment variable"),
        );
    }

    if url::Url::parse(&config.maps.base_url).is_err() {
        result = result.with_error(ValidationIssue::new(
            "maps.base_url",
            format!("Not a valid URL: {}", config.maps.base_url),
        ));
    }

    result
}

fn validate_game_config(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    let game = &config.game;

    if game.max_waypoints == 0 || game.places_per_keyword == 0 {
        result = result.with_error(ValidationIssue::new(
            "game.max_waypoints",
            "max_waypoints and places_per_keyword must both be at least 1",
        ));
    }

    if !game.tolerance_deg.is_finite() || game.tolerance_deg < 0.0 {
        result = result.with_error(ValidationIssue::new(
            "game.tolerance_deg",
            format!("Tolerance must be a non-negative number, got {}", game.tolerance_deg),
        ));
    } else if game.tolerance_deg >= 1.0 {
        result = result.with_warning(
            ValidationIssue::new(
                "game.tolerance_deg",
                format!(
                    "Tolerance of {} degrees accepts locations over 100 km from the target",
                    game.tolerance_deg
                ),
            )
            .with_suggestion("A value around 0.0005 matches roughly 50 m"),
        );
    }

    if game.sight_radius_m < 50 {
        result = result.with_warning(
            ValidationIssue::new(
                "game.sight_radius_m",
                format!(
                    "Sight radius of {} m rarely finds anything beside the route",
                    game.sight_radius_m
                ),
            )
            .with_suggestion("Use 100 m or more for richer riddles"),
        );
    }

    result
}
