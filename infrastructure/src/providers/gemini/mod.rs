//! Google Gemini provider
//!
//! [`types`] holds the wire format and is always available (the fixture
//! gateway replays recorded Gemini responses). The HTTP gateway itself is
//! behind the `gemini` feature.

#[cfg(feature = "gemini")]
mod gateway;
pub mod types;

#[cfg(feature = "gemini")]
pub use gateway::GeminiGateway;
