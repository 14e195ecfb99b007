//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod assistant;
mod logging;
mod provider;
mod resolver;

pub use assistant::FileAssistantConfig;
pub use logging::FileLoggingConfig;
pub use provider::{FileFixtureConfig, FileGeminiConfig, FileProviderConfig, ProviderKind};
pub use resolver::FileResolverConfig;

use dispatch_application::ResolverConfig;
use dispatch_domain::{GenerationParams, SafetyProfile};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("resolver.deadline_seconds cannot be 0")]
    InvalidDeadline,

    #[error("resolver.model cannot be empty")]
    EmptyModelName,

    #[error("generation.temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("generation.max_output_tokens cannot be 0")]
    InvalidMaxOutputTokens,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Who the assistant is
    pub assistant: FileAssistantConfig,
    /// Which gateway answers, and its credentials
    pub provider: FileProviderConfig,
    /// Model, required policy, deadline, recovery
    pub resolver: FileResolverConfig,
    /// Sampling parameters (uses domain type)
    pub generation: GenerationParams,
    /// Harm category → block threshold (uses domain type)
    pub safety: SafetyProfile,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.resolver.deadline_seconds == 0 {
            return Err(ConfigValidationError::InvalidDeadline);
        }
        if self.resolver.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        let temperature = self.generation.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigValidationError::InvalidTemperature(temperature));
        }
        if self.generation.max_output_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxOutputTokens);
        }
        Ok(())
    }

    /// Validate and convert into the application's resolver settings.
    pub fn to_resolver_config(&self) -> Result<ResolverConfig, ConfigValidationError> {
        self.validate()?;
        Ok(ResolverConfig::default()
            .with_model(self.resolver.model.trim())
            .with_generation(self.generation.clone())
            .with_safety(self.safety.clone())
            .with_required_policy(self.resolver.required_policy)
            .with_deadline(Some(Duration::from_secs(self.resolver.deadline_seconds)))
            .with_acknowledgments(self.resolver.acknowledgments.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_domain::{BlockThreshold, HarmCategory, RequiredPolicy};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[assistant]
name = "Lía"
business = "Clínica Sonrisa"

[provider]
kind = "gemini"

[provider.gemini]
api_key_env = "MY_GEMINI_KEY"

[resolver]
model = "gemini-2.0-flash"
deadline_seconds = 30

[generation]
temperature = 0.3

[safety]
harassment = "block_only_high"

[logging]
conversation_log = "logs/turns.jsonl"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.assistant.name, "Lía");
        assert_eq!(config.provider.gemini.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.resolver.deadline_seconds, 30);
        assert_eq!(config.generation.temperature, 0.3);
        assert_eq!(config.generation.max_output_tokens, 2048);
        assert_eq!(
            config.safety.threshold(HarmCategory::Harassment),
            Some(BlockThreshold::BlockOnlyHigh)
        );
        assert!(config.logging.conversation_log.is_some());
    }

    #[test]
    fn test_defaults_convert() {
        let resolver = FileConfig::default().to_resolver_config().unwrap();
        assert_eq!(resolver, ResolverConfig::default());
    }

    #[test]
    fn test_conversion_carries_settings() {
        let mut config = FileConfig::default();
        config.resolver.model = "  gemini-2.0-flash ".to_string();
        config.resolver.required_policy = RequiredPolicy::FromDefinitions;
        config.resolver.deadline_seconds = 5;

        let resolver = config.to_resolver_config().unwrap();
        assert_eq!(resolver.model, "gemini-2.0-flash");
        assert_eq!(resolver.required_policy, RequiredPolicy::FromDefinitions);
        assert_eq!(resolver.deadline, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_validate_zero_deadline() {
        let mut config = FileConfig::default();
        config.resolver.deadline_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidDeadline));
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = FileConfig::default();
        config.resolver.model = " ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_validate_generation() {
        let mut config = FileConfig::default();
        config.generation.temperature = 3.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature(3.5))
        );

        let mut config = FileConfig::default();
        config.generation.max_output_tokens = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxOutputTokens)
        );
    }

    #[test]
    fn test_default_config_serializes_to_toml() {
        let text = toml::to_string_pretty(&FileConfig::default()).unwrap();
        let parsed: FileConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, FileConfig::default());
    }
}
