//! Conversation turns replayed to the model.
//!
//! The history is owned by the caller's conversation store. The dispatch
//! engine only reads it; the multi-turn "collect parameters → confirm →
//! re-invoke" protocol lives entirely in what is replayed here.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    #[serde(alias = "model")]
    Assistant,
    /// Result of a function the business layer executed.
    Function,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
            TurnRole::Function => "function",
        }
    }
}

impl std::str::FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            // "model" is the provider-side spelling
            "assistant" | "model" => Ok(TurnRole::Assistant),
            "function" => Ok(TurnRole::Function),
            other => Err(format!("unknown turn role: {}", other)),
        }
    }
}

/// One message in the replayed history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    #[serde(default)]
    pub message: String,
    /// Name of the executed function, for [`TurnRole::Function`] turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
}

impl ConversationTurn {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            message: message.into(),
            function_name: None,
        }
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            message: message.into(),
            function_name: None,
        }
    }

    pub fn function_result(function_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Function,
            message: message.into(),
            function_name: Some(function_name.into()),
        }
    }

    pub fn is_function_result(&self) -> bool {
        self.role == TurnRole::Function && self.function_name.is_some()
    }
}

/// Name of the most recently executed function in the history, if any.
pub fn last_executed_function(history: &[ConversationTurn]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|t| t.is_function_result())
        .and_then(|t| t.function_name.as_deref())
}
