//! Domain error types

use thiserror::Error;

/// Reasons the resolution algorithm can reject a model response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Response blocked by the provider's safety filter")]
    SafetyBlocked,

    #[error("Model returned no usable text or function call (finish reason: {finish_reason})")]
    EmptyOrUnparseableResponse { finish_reason: String },
}

impl DomainError {
    /// Finish reason placeholder when the provider reported none.
    pub const UNKNOWN_FINISH_REASON: &'static str = "unknown";

    pub fn is_safety_blocked(&self) -> bool {
        matches!(self, DomainError::SafetyBlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_display() {
        let error = DomainError::EmptyOrUnparseableResponse {
            finish_reason: "RECITATION".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Model returned no usable text or function call (finish reason: RECITATION)"
        );
    }

    #[test]
    fn test_is_safety_blocked_check() {
        assert!(DomainError::SafetyBlocked.is_safety_blocked());
        assert!(
            !DomainError::EmptyOrUnparseableResponse {
                finish_reason: DomainError::UNKNOWN_FINISH_REASON.to_string()
            }
            .is_safety_blocked()
        );
    }
}
