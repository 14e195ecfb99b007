//! Wire types for the Gemini `generateContent` API and conversions to and
//! from domain types.
//!
//! Only the fields the dispatcher reads or writes are modelled; everything
//! else in a response is ignored on deserialization.

use dispatch_application::ports::llm_gateway::{GatewayError, GenerateRequest};
use dispatch_domain::{
    BlockThreshold, ContentPart, ConversationTurn, FinishReason, FunctionCall, FunctionDeclaration,
    GenerationParams, HarmCategory, ModelResponse, SafetyProfile, ToolSchema, TurnRole,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<GeminiTool>,
    pub generation_config: GeminiGenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<GeminiSafetySetting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.into()),
                ..Default::default()
            }],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GeminiFunctionCall>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiFunctionCall {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiTool {
    pub function_declarations: Vec<GeminiFunctionDeclaration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiFunctionDeclaration {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeminiSafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorBody {
    pub error: GeminiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorDetail {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

// ─── Domain → Gemini ─────────────────────────────────────────────

/// Build the request body for one turn.
pub fn build_request(request: &GenerateRequest) -> GeminiRequest {
    let mut contents: Vec<GeminiContent> =
        request.history.iter().filter_map(convert_turn).collect();
    contents.push(GeminiContent::text(Some("user"), request.message.clone()));

    let system_instruction = if request.system_instruction.trim().is_empty() {
        None
    } else {
        Some(GeminiContent::text(None, request.system_instruction.clone()))
    };

    GeminiRequest {
        system_instruction,
        contents,
        tools: request.tools.as_ref().map(convert_tools).into_iter().collect(),
        generation_config: convert_generation(&request.generation),
        safety_settings: convert_safety(&request.safety),
    }
}

/// Convert a history turn onto Gemini's two roles. Blank turns are dropped.
///
/// Function results are replayed as user text: a `functionResponse` part is
/// only accepted right after the model's own `functionCall`, which history
/// does not carry.
pub fn convert_turn(turn: &ConversationTurn) -> Option<GeminiContent> {
    if turn.message.trim().is_empty() {
        return None;
    }
    match (turn.role, turn.function_name.as_deref()) {
        (TurnRole::Assistant, _) => Some(GeminiContent::text(Some("model"), turn.message.clone())),
        (TurnRole::Function, Some(name)) => Some(GeminiContent::text(
            Some("user"),
            format!("Result of {}: {}", name, turn.message),
        )),
        (TurnRole::User, _) | (TurnRole::Function, None) => {
            Some(GeminiContent::text(Some("user"), turn.message.clone()))
        }
    }
}

pub fn convert_tools(schema: &ToolSchema) -> GeminiTool {
    GeminiTool {
        function_declarations: schema.functions.iter().map(convert_declaration).collect(),
    }
}

/// Convert one declaration. Functions without properties carry no
/// `parameters` object at all.
pub fn convert_declaration(declaration: &FunctionDeclaration) -> GeminiFunctionDeclaration {
    let parameters = if declaration.parameters.is_empty() {
        None
    } else {
        let properties: Map<String, Value> = declaration
            .parameters
            .properties
            .iter()
            .map(|(name, property)| {
                let mut schema = json!({
                    "type": property.primitive_type.as_str(),
                    "description": property.description,
                });
                if let Some(items) = property.items {
                    schema["items"] = json!({ "type": items.as_str() });
                }
                (name.clone(), schema)
            })
            .collect();

        let mut object = json!({
            "type": "object",
            "properties": properties,
        });
        if !declaration.parameters.required.is_empty() {
            object["required"] = json!(declaration.parameters.required);
        }
        Some(object)
    };

    GeminiFunctionDeclaration {
        name: declaration.name.clone(),
        description: declaration.description.clone(),
        parameters,
    }
}

pub fn convert_generation(params: &GenerationParams) -> GeminiGenerationConfig {
    GeminiGenerationConfig {
        temperature: params.temperature,
        max_output_tokens: params.max_output_tokens,
    }
}

pub fn convert_safety(profile: &SafetyProfile) -> Vec<GeminiSafetySetting> {
    profile
        .iter()
        .map(|(category, threshold)| GeminiSafetySetting {
            category: harm_category_name(category),
            threshold: threshold_name(threshold),
        })
        .collect()
}

fn harm_category_name(category: HarmCategory) -> &'static str {
    match category {
        HarmCategory::Harassment => "HARM_CATEGORY_HARASSMENT",
        HarmCategory::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
        HarmCategory::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        HarmCategory::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
    }
}

fn threshold_name(threshold: BlockThreshold) -> &'static str {
    match threshold {
        BlockThreshold::BlockNone => "BLOCK_NONE",
        BlockThreshold::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
        BlockThreshold::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
        BlockThreshold::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
    }
}

// ─── Gemini → Domain ─────────────────────────────────────────────

pub fn convert_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::MaxTokens,
        "SAFETY" => FinishReason::Safety,
        other => FinishReason::Other(other.to_string()),
    }
}

/// Convert a single part. Returns `None` for parts the dispatcher ignores.
pub fn convert_part(part: &GeminiPart) -> Option<ContentPart> {
    if let Some(call) = &part.function_call {
        let arguments = match &call.args {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        return Some(ContentPart::FunctionCall(FunctionCall::with_arguments(
            call.name.clone(),
            arguments,
        )));
    }
    part.text.as_ref().map(|text| ContentPart::text(text.clone()))
}

/// Convert the first candidate of a response.
pub fn convert_response(response: &GeminiResponse) -> ModelResponse {
    let prompt_block_reason = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone());

    let Some(candidate) = response.candidates.first() else {
        return ModelResponse {
            prompt_block_reason,
            model: response.model_version.clone(),
            ..Default::default()
        };
    };

    let parts = candidate
        .content
        .as_ref()
        .map(|c| c.parts.iter().filter_map(convert_part).collect())
        .unwrap_or_default();

    ModelResponse {
        parts,
        finish_reason: candidate.finish_reason.as_deref().map(convert_finish_reason),
        prompt_block_reason,
        model: response.model_version.clone(),
    }
}

/// Parse a response body.
pub fn parse_response(body: &str) -> Result<ModelResponse, GatewayError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("Gemini response: {}", e)))?;
    Ok(convert_response(&response))
}

/// Convert a non-success HTTP status and its body to a GatewayError.
pub fn convert_http_error(status: u16, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<GeminiErrorBody>(body)
        .map(|b| match b.error.status {
            Some(s) => format!("{} ({})", b.error.message, s),
            None => b.error.message,
        })
        .unwrap_or_else(|_| body.chars().take(200).collect());

    match status {
        408 | 504 => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("Gemini HTTP {}: {}", status, detail)),
    }
}
