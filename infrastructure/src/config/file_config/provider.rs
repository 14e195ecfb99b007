//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which gateway answers the turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Replays a recorded response from disk.
    Fixture,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "fixture" => Ok(ProviderKind::Fixture),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub kind: ProviderKind,
    pub gemini: FileGeminiConfig,
    pub fixture: FileFixtureConfig,
}

/// Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key. Prefer `api_key_env`.
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API.
    pub base_url: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

impl FileGeminiConfig {
    /// Resolve the API key: explicit value first, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFixtureConfig {
    /// Recorded provider response (Gemini JSON).
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_deserialize() {
        let toml_str = r#"
[provider]
kind = "fixture"

[provider.fixture]
path = "fixtures/agendar.json"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Fixture);
        assert_eq!(
            config.provider.fixture.path,
            Some(PathBuf::from("fixtures/agendar.json"))
        );
        assert_eq!(config.provider.gemini.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let config = FileGeminiConfig {
            api_key: Some("from-file".to_string()),
            api_key_env: "DISPATCH_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-file"));
    }

    #[test]
    fn test_missing_api_key() {
        let config = FileGeminiConfig {
            api_key: Some("   ".to_string()),
            api_key_env: "DISPATCH_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert!("openai".parse::<ProviderKind>().is_err());
    }
}
