//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use dispatch_domain::{
    ConversationTurn, GenerationParams, ModelResponse, SafetyProfile, ToolSchema,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether the gateway cannot be used at all until it is reconfigured.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingCredential(_) | GatewayError::NotConfigured(_)
        )
    }
}

/// Everything the provider needs for one turn.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: String,
    /// `None` when no task is invokable; the provider gets no tools at all.
    pub tools: Option<ToolSchema>,
    pub history: Vec<ConversationTurn>,
    pub message: String,
    pub generation: GenerationParams,
    pub safety: SafetyProfile,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Provider name for logs (e.g. `gemini`, `fixture`).
    fn name(&self) -> &str;

    /// Check credentials and configuration without touching the network.
    fn ensure_configured(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    /// Send one request and return the first candidate.
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_is_configuration() {
        assert!(GatewayError::MissingCredential("GEMINI_API_KEY".into()).is_configuration());
        assert!(GatewayError::NotConfigured("fixture path".into()).is_configuration());
        assert!(!GatewayError::Timeout.is_configuration());
        assert!(!GatewayError::RequestFailed("500".into()).is_configuration());
    }

    #[test]
    fn test_request_serializes_absent_tools_as_null() {
        let request = GenerateRequest {
            model: "gemini-1.5-flash-latest".to_string(),
            system_instruction: "You are Lía".to_string(),
            tools: None,
            history: vec![ConversationTurn::user("Hola")],
            message: "Quiero una cita".to_string(),
            generation: GenerationParams::default(),
            safety: SafetyProfile::default(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["tools"].is_null());
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["generation"]["max_output_tokens"], 2048);
    }
}
