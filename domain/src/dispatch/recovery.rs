//! Recovery of function calls the model wrote as text.
//!
//! Some models, when they fail to use the structured tool channel, embed the
//! call in a fenced JSON block instead:
//!
//! ````text
//! Claro, lo agendo.
//! ```json
//! {"functionCall": {"name": "agendarCita", "args": {"fecha": "2025-01-01"}}}
//! ```
//! ````
//!
//! Strategies here try to extract such a call. They never fail: anything
//! they cannot parse is left alone and the raw text stands.

use super::reply::FunctionCall;
use serde_json::Value;

/// A way of pulling a [`FunctionCall`] out of free text.
pub trait RecoveryStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns the recovered call, or `None` if the text holds none.
    fn try_recover(&self, text: &str) -> Option<FunctionCall>;
}

/// Looks for the first ```` ```json ```` fenced block and accepts it only if
/// it has the shape `{"functionCall": {"name": string, "args": object}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedJsonRecovery;

impl FencedJsonRecovery {
    pub fn new() -> Self {
        Self
    }
}

impl RecoveryStrategy for FencedJsonRecovery {
    fn name(&self) -> &'static str {
        "fenced_json"
    }

    fn try_recover(&self, text: &str) -> Option<FunctionCall> {
        let block = extract_fenced_json(text)?;
        let value: Value = serde_json::from_str(block).ok()?;
        parse_function_call_envelope(&value)
    }
}

/// The default strategy list.
pub fn default_strategies() -> Vec<Box<dyn RecoveryStrategy>> {
    vec![Box::new(FencedJsonRecovery)]
}

/// Contents of the first ```` ```json ```` block, trimmed.
///
/// Returns `None` when there is no opening fence or no closing fence after it.
pub fn extract_fenced_json(text: &str) -> Option<&str> {
    const OPEN: &str = "```json";
    const CLOSE: &str = "```";

    let start = text.find(OPEN)? + OPEN.len();
    let rest = &text[start..];
    let end = rest.find(CLOSE)?;
    Some(rest[..end].trim())
}

fn parse_function_call_envelope(value: &Value) -> Option<FunctionCall> {
    let call = value.get("functionCall")?;
    let name = call.get("name")?.as_str()?;
    let args = call.get("args")?.as_object()?;
    Some(FunctionCall::with_arguments(name, args.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_embedded_call() {
        let text = "Claro, lo agendo.\n```json\n{\"functionCall\": {\"name\": \"agendarCita\", \"args\": {\"fecha\": \"2025-01-01\"}}}\n```";
        let call = FencedJsonRecovery.try_recover(text).unwrap();
        assert_eq!(call.name, "agendarCita");
        assert_eq!(call.get_string("fecha"), Some("2025-01-01"));
    }

    #[test]
    fn test_extract_first_block_only() {
        let text = "```json\n{\"a\":1}\n```\n```json\n{\"b\":2}\n```";
        assert_eq!(extract_fenced_json(text), Some("{\"a\":1}"));
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(extract_fenced_json("```json\n{\"a\":1}"), None);
        assert_eq!(extract_fenced_json("no fences here"), None);
    }

    #[test]
    fn test_plain_fence_is_ignored() {
        let text = "```\n{\"functionCall\": {\"name\": \"x\", \"args\": {}}}\n```";
        assert!(FencedJsonRecovery.try_recover(text).is_none());
    }

    #[test]
    fn test_malformed_json_is_absorbed() {
        let text = "```json\n{\"functionCall\": {\"name\": \"agendarCita\", \"args\": {\"fecha\": \"2025-01-01\",}}}\n```";
        assert!(FencedJsonRecovery.try_recover(text).is_none());
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let cases = [
            r#"{"name": "agendarCita", "args": {}}"#,
            r#"{"functionCall": {"name": 7, "args": {}}}"#,
            r#"{"functionCall": {"name": "agendarCita"}}"#,
            r#"{"functionCall": {"name": "agendarCita", "args": "fecha=hoy"}}"#,
            r#"["functionCall"]"#,
        ];
        for body in cases {
            let text = format!("```json\n{}\n```", body);
            assert!(
                FencedJsonRecovery.try_recover(&text).is_none(),
                "accepted: {}",
                body
            );
        }
    }

    #[test]
    fn test_empty_args_accepted() {
        let text = "```json {\"functionCall\": {\"name\": \"listarServicios\", \"args\": {}}} ```";
        let call = FencedJsonRecovery.try_recover(text).unwrap();
        assert_eq!(call.name, "listarServicios");
        assert!(call.arguments.is_empty());
    }
}
