//! Gateway that replays a recorded Gemini response.
//!
//! Lets the resolver run end to end without network access: the request is
//! built as usual, then the recorded body goes through the same wire
//! conversion a live response would.

use crate::providers::gemini::types::parse_response;
use async_trait::async_trait;
use dispatch_application::ports::llm_gateway::{GatewayError, GenerateRequest, LlmGateway};
use dispatch_domain::ModelResponse;
use std::path::{Path, PathBuf};
use tracing::debug;

enum Source {
    File(PathBuf),
    Body(String),
}

pub struct FixtureGateway {
    source: Source,
}

impl FixtureGateway {
    /// Replay the file at `path` on every call.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
        }
    }

    /// Replay an in-memory body on every call.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            source: Source::Body(body.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File(path) => Some(path),
            Source::Body(_) => None,
        }
    }
}

#[async_trait]
impl LlmGateway for FixtureGateway {
    fn name(&self) -> &str {
        "fixture"
    }

    fn ensure_configured(&self) -> Result<(), GatewayError> {
        match &self.source {
            Source::File(path) if !path.is_file() => Err(GatewayError::NotConfigured(format!(
                "fixture file not found: {}",
                path.display()
            ))),
            _ => Ok(()),
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse, GatewayError> {
        debug!(
            "Replaying fixture for model {} ({} history turns)",
            request.model,
            request.history.len()
        );
        let body = match &self.source {
            Source::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                GatewayError::Other(format!("reading fixture {}: {}", path.display(), e))
            })?,
            Source::Body(body) => body.clone(),
        };
        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_domain::{GenerationParams, SafetyProfile};

    fn request() -> GenerateRequest {
        GenerateRequest {
            model: "gemini-1.5-flash-latest".to_string(),
            system_instruction: String::new(),
            tools: None,
            history: vec![],
            message: "Hola".to_string(),
            generation: GenerationParams::default(),
            safety: SafetyProfile::default(),
        }
    }

    #[tokio::test]
    async fn test_replays_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        std::fs::write(
            &path,
            r#"{"candidates": [{"content": {"parts": [{"text": "Hola, ¿en qué te ayudo?"}]}, "finishReason": "STOP"}]}"#,
        )
        .unwrap();

        let gateway = FixtureGateway::from_file(&path);
        assert!(gateway.ensure_configured().is_ok());
        let response = gateway.generate(&request()).await.unwrap();
        assert_eq!(response.text_content(), "Hola, ¿en qué te ayudo?");
    }

    #[test]
    fn test_missing_file_is_not_configured() {
        let gateway = FixtureGateway::from_file("/nonexistent/response.json");
        assert!(gateway.ensure_configured().unwrap_err().is_configuration());
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let gateway = FixtureGateway::from_body("not json");
        let err = gateway.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
