//! The canonical outcome of a resolved turn.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A request from the model to invoke a named function.
///
/// Executing it is the caller's job; the dispatch engine never runs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_arguments(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }

    /// Get a bool argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(Value::as_bool)
    }
}

/// What the assistant answers for one turn: text, a function call, or both.
///
/// A successfully resolved reply always has at least one of the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: Option<String>,
    pub function_call: Option<FunctionCall>,
}

impl AssistantReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_call: None,
        }
    }

    pub fn call(text: impl Into<String>, call: FunctionCall) -> Self {
        Self {
            text: Some(text.into()),
            function_call: Some(call),
        }
    }

    pub fn has_function_call(&self) -> bool {
        self.function_call.is_some()
    }

    /// Trim the text, dropping it entirely when nothing visible remains.
    pub(crate) fn normalized(mut self) -> Self {
        self.text = self
            .text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_call_accessors() {
        let call = FunctionCall::new("reagendarCita")
            .with_arg("cita_id_original", "c-42")
            .with_arg("confirmacion_usuario_reagendar", true);

        assert_eq!(call.get_string("cita_id_original"), Some("c-42"));
        assert_eq!(call.get_bool("confirmacion_usuario_reagendar"), Some(true));
        assert_eq!(call.get_string("missing"), None);
    }

    #[test]
    fn test_normalized_trims_and_drops_blank() {
        let reply = AssistantReply::text("  Hola  \n").normalized();
        assert_eq!(reply.text.as_deref(), Some("Hola"));

        let reply = AssistantReply::call("   ", FunctionCall::new("x")).normalized();
        assert!(reply.text.is_none());
        assert!(reply.has_function_call());
    }

    #[test]
    fn test_reply_serializes_nulls() {
        let json = serde_json::to_value(AssistantReply::text("Hola")).unwrap();
        assert_eq!(json["text"], "Hola");
        assert!(json["function_call"].is_null());
    }
}
