//! Resolver configuration from TOML (`[resolver]` section)

use dispatch_application::DEFAULT_MODEL;
use dispatch_domain::{Acknowledgments, RequiredPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResolverConfig {
    /// Provider model identifier
    pub model: String,
    /// "omit" (default) or "from_definitions"
    pub required_policy: RequiredPolicy,
    /// Deadline for the provider call, in seconds
    pub deadline_seconds: u64,
    /// Recover function calls the model wrote as fenced JSON
    pub recovery: bool,
    /// Texts used when a call arrives without usable text
    pub acknowledgments: Acknowledgments,
}

impl Default for FileResolverConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            required_policy: RequiredPolicy::default(),
            deadline_seconds: 60,
            recovery: true,
            acknowledgments: Acknowledgments::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_deserialize() {
        let toml_str = r#"
[resolver]
model = "gemini-2.0-flash"
required_policy = "from_definitions"
deadline_seconds = 15

[resolver.acknowledgments]
structured_call = "Entendido, dame un momento."
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.resolver.model, "gemini-2.0-flash");
        assert_eq!(config.resolver.required_policy, RequiredPolicy::FromDefinitions);
        assert_eq!(config.resolver.deadline_seconds, 15);
        assert!(config.resolver.recovery);
        assert_eq!(
            config.resolver.acknowledgments.structured_call,
            "Entendido, dame un momento."
        );
        // Unset fields keep their defaults
        assert_eq!(
            config.resolver.acknowledgments.recovered_call,
            Acknowledgments::default().recovered_call
        );
    }
}
