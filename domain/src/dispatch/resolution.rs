//! Turning one model response into one [`AssistantReply`].
//!
//! Precedence, first match wins:
//!
//! 1. A structured function-call part. Its arguments are taken verbatim and
//!    the text falls back to the structured acknowledgment when blank.
//! 2. A safety block, either on the candidate or on the prompt.
//! 3. A call recovered from the text by one of the [`RecoveryStrategy`]s.
//!    The text is replaced by the recovered acknowledgment.
//! 4. Plain text, whatever the finish reason, as long as it is not blank.
//!
//! Anything else is [`DomainError::EmptyOrUnparseableResponse`].

use super::recovery::RecoveryStrategy;
use super::reply::{AssistantReply, FunctionCall};
use crate::core::error::DomainError;
use crate::session::response::ModelResponse;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the function name in
/// [`Acknowledgments::recovered_call`].
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Text shown to the user when the model called a function without saying
/// anything useful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acknowledgments {
    /// Used when a structured call arrives with blank text.
    pub structured_call: String,
    /// Used when a call was recovered from text. `{name}` is substituted.
    pub recovered_call: String,
}

impl Default for Acknowledgments {
    fn default() -> Self {
        Self {
            structured_call: "Understood, give me a moment.".to_string(),
            recovered_call: format!("Understood. Processing your request for: {}.", NAME_PLACEHOLDER),
        }
    }
}

impl Acknowledgments {
    pub fn with_structured_call(mut self, text: impl Into<String>) -> Self {
        self.structured_call = text.into();
        self
    }

    pub fn with_recovered_call(mut self, template: impl Into<String>) -> Self {
        self.recovered_call = template.into();
        self
    }

    /// The structured-call acknowledgment. A blank text falls back to the
    /// default one, so a call never goes out without text.
    pub fn structured(&self) -> String {
        if self.structured_call.trim().is_empty() {
            Self::default().structured_call
        } else {
            self.structured_call.clone()
        }
    }

    /// Render the recovered-call acknowledgment for `name`. A blank
    /// template falls back to the default one.
    pub fn recovered_for(&self, name: &str) -> String {
        let template = if self.recovered_call.trim().is_empty() {
            Self::default().recovered_call
        } else {
            self.recovered_call.clone()
        };
        template.replace(NAME_PLACEHOLDER, name)
    }
}

/// Where the reply's function call came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOrigin {
    /// The provider's structured tool channel.
    Structured,
    /// Extracted from text by the named strategy.
    Recovered { strategy: &'static str },
    /// No call; the reply is plain text.
    Text,
}

/// A resolved reply plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub reply: AssistantReply,
    pub origin: ReplyOrigin,
}

/// Resolve a model response into a reply.
///
/// Pure and infallible apart from the two domain rejections; recovery
/// failures are absorbed and leave the raw text in place.
pub fn resolve_response(
    response: &ModelResponse,
    strategies: &[Box<dyn RecoveryStrategy>],
    acknowledgments: &Acknowledgments,
) -> Result<Resolution, DomainError> {
    let text = response.text_content();

    if let Some(call) = response.function_call() {
        let text = if text.trim().is_empty() {
            acknowledgments.structured()
        } else {
            text
        };
        return Ok(Resolution {
            reply: AssistantReply::call(text, call.clone()).normalized(),
            origin: ReplyOrigin::Structured,
        });
    }

    if response.is_safety_blocked() {
        return Err(DomainError::SafetyBlocked);
    }

    if let Some((strategy, call)) = recover(&text, strategies) {
        let ack = acknowledgments.recovered_for(&call.name);
        return Ok(Resolution {
            reply: AssistantReply::call(ack, call).normalized(),
            origin: ReplyOrigin::Recovered { strategy },
        });
    }

    let reply = AssistantReply::text(text).normalized();
    if reply.text.is_none() {
        let finish_reason = response
            .finish_reason
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| DomainError::UNKNOWN_FINISH_REASON.to_string());
        return Err(DomainError::EmptyOrUnparseableResponse { finish_reason });
    }

    Ok(Resolution {
        reply,
        origin: ReplyOrigin::Text,
    })
}

fn recover(
    text: &str,
    strategies: &[Box<dyn RecoveryStrategy>],
) -> Option<(&'static str, FunctionCall)> {
    if text.trim().is_empty() {
        return None;
    }
    strategies
        .iter()
        .find_map(|s| s.try_recover(text).map(|call| (s.name(), call)))
}
