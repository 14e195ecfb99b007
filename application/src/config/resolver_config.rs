//! Resolver configuration: how a turn is sent and resolved.
//!
//! [`ResolverConfig`] groups the static settings that control
//! [`ResolveTurnUseCase`](crate::use_cases::resolve_turn::ResolveTurnUseCase).
//! The infrastructure layer builds it from the merged config files.

use dispatch_domain::{Acknowledgments, GenerationParams, RequiredPolicy, SafetyProfile};
use std::time::Duration;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Deadline applied to the provider call when none is configured.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Provider model identifier.
    pub model: String,
    pub generation: GenerationParams,
    pub safety: SafetyProfile,
    /// Whether compiled schemas mark parameters as required.
    pub required_policy: RequiredPolicy,
    /// Upper bound on the provider call. `None` waits indefinitely.
    pub deadline: Option<Duration>,
    pub acknowledgments: Acknowledgments,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            generation: GenerationParams::default(),
            safety: SafetyProfile::default(),
            required_policy: RequiredPolicy::default(),
            deadline: Some(DEFAULT_DEADLINE),
            acknowledgments: Acknowledgments::default(),
        }
    }
}

impl ResolverConfig {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_safety(mut self, safety: SafetyProfile) -> Self {
        self.safety = safety;
        self
    }

    pub fn with_required_policy(mut self, policy: RequiredPolicy) -> Self {
        self.required_policy = policy;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_acknowledgments(mut self, acknowledgments: Acknowledgments) -> Self {
        self.acknowledgments = acknowledgments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ResolverConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash-latest");
        assert_eq!(config.deadline, Some(Duration::from_secs(60)));
        assert_eq!(config.required_policy, RequiredPolicy::Omit);
        assert_eq!(config.generation.temperature, 0.1);
    }

    #[test]
    fn test_builder() {
        let config = ResolverConfig::default()
            .with_model("gemini-2.0-flash")
            .with_required_policy(RequiredPolicy::FromDefinitions)
            .with_deadline(None);

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.required_policy, RequiredPolicy::FromDefinitions);
        assert!(config.deadline.is_none());
    }
}
