//! Gemini `generateContent` gateway over HTTPS.

use super::types::{build_request, convert_http_error, parse_response};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use dispatch_application::ports::llm_gateway::{GatewayError, GenerateRequest, LlmGateway};
use dispatch_domain::ModelResponse;
use tracing::debug;

pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiGateway {
    /// Build the gateway. A missing key is reported by
    /// [`ensure_configured`](LlmGateway::ensure_configured), not here.
    pub fn new(config: &FileGeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
        }
    }

    /// Share an existing HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn api_key(&self) -> Result<&str, GatewayError> {
        self.api_key.as_deref().ok_or_else(|| {
            GatewayError::MissingCredential(format!(
                "Gemini API key not set (export {} or set provider.gemini.api_key)",
                self.api_key_env
            ))
        })
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    fn name(&self) -> &str {
        "gemini"
    }

    fn ensure_configured(&self) -> Result<(), GatewayError> {
        self.api_key().map(|_| ())
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<ModelResponse, GatewayError> {
        let api_key = self.api_key()?;
        let url = self.endpoint(&request.model);
        let body = build_request(request);
        debug!(
            "POST {} ({} contents, {} tool groups)",
            url,
            body.contents.len(),
            body.tools.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(convert_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(convert_reqwest_error)?;
        if !status.is_success() {
            return Err(convert_http_error(status.as_u16(), &text));
        }

        parse_response(&text)
    }
}

fn convert_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else {
        GatewayError::RequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> FileGeminiConfig {
        FileGeminiConfig {
            api_key: api_key.map(str::to_string),
            api_key_env: "DISPATCH_TEST_UNSET_KEY_VAR".to_string(),
            base_url: "https://example.test/v1beta/".to_string(),
        }
    }

    #[test]
    fn test_endpoint() {
        let gateway = GeminiGateway::new(&config(Some("k")));
        assert_eq!(
            gateway.endpoint("gemini-1.5-flash-latest"),
            "https://example.test/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_missing_key_reported_without_network() {
        let gateway = GeminiGateway::new(&config(None));
        let err = gateway.ensure_configured().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("DISPATCH_TEST_UNSET_KEY_VAR"));
    }

    #[test]
    fn test_configured_with_key() {
        assert!(GeminiGateway::new(&config(Some("k"))).ensure_configured().is_ok());
    }
}
