//! LLM provider gateways

pub mod fixture;
pub mod gemini;

pub use fixture::FixtureGateway;
#[cfg(feature = "gemini")]
pub use gemini::GeminiGateway;
