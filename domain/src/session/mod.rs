//! Provider session concepts: what is sent with a request and what comes back.

pub mod generation;
pub mod response;

pub use generation::{BlockThreshold, GenerationParams, HarmCategory, SafetyProfile};
pub use response::{ContentPart, FinishReason, ModelResponse};
