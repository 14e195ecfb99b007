//! Application layer for assistant-dispatch
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_DEADLINE, DEFAULT_MODEL, ResolverConfig};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, GenerateRequest, LlmGateway},
};
pub use use_cases::resolve_turn::{
    FailureKind, ResolveTurnError, ResolveTurnInput, ResolveTurnUseCase,
};
