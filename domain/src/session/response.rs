//! Provider-neutral model response.
//!
//! Adapters convert the provider's first candidate into a [`ModelResponse`]:
//! an ordered list of [`ContentPart`]s plus the reason generation stopped.
//! The resolver only ever looks at this type, never at wire payloads.

use crate::dispatch::reply::FunctionCall;
use serde::{Deserialize, Serialize};

/// A single part of the candidate's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Free text from the model.
    Text { text: String },
    /// A function call sent through the structured channel.
    FunctionCall(FunctionCall),
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            ContentPart::FunctionCall(call) => Some(call),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of the response.
    Stop,
    /// Output hit the token limit; text may be truncated.
    MaxTokens,
    /// The candidate was blocked by the safety filter.
    Safety,
    /// Provider-specific reason, kept verbatim for diagnostics.
    Other(String),
}

impl FinishReason {
    /// Whether text ending with this reason is a normal reply.
    pub fn is_normal(&self) -> bool {
        matches!(self, FinishReason::Stop | FinishReason::MaxTokens)
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinishReason::Stop => write!(f, "STOP"),
            FinishReason::MaxTokens => write!(f, "MAX_TOKENS"),
            FinishReason::Safety => write!(f, "SAFETY"),
            FinishReason::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// The first candidate of a provider response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResponse {
    pub parts: Vec<ContentPart>,
    pub finish_reason: Option<FinishReason>,
    /// Set when the provider refused the prompt itself (no candidate at all).
    pub prompt_block_reason: Option<String>,
    /// Model identifier, if returned by the provider.
    pub model: Option<String>,
}

impl ModelResponse {
    pub fn new(parts: Vec<ContentPart>, finish_reason: Option<FinishReason>) -> Self {
        Self {
            parts,
            finish_reason,
            prompt_block_reason: None,
            model: None,
        }
    }

    /// Text-only response that finished normally.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![ContentPart::text(text)], Some(FinishReason::Stop))
    }

    /// Concatenate all text parts.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(ContentPart::as_text)
            .collect::<Vec<_>>()
            .join("")
    }

    /// The first structured function call, if any.
    pub fn function_call(&self) -> Option<&FunctionCall> {
        self.parts.iter().find_map(ContentPart::as_function_call)
    }

    /// Whether the provider's safety filter stopped the candidate or the prompt.
    pub fn is_safety_blocked(&self) -> bool {
        self.finish_reason == Some(FinishReason::Safety) || self.prompt_block_reason.is_some()
    }
}
