//! Domain layer for assistant-dispatch
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool Schema Compiler
//!
//! A business configures *tasks*; some are backed by an automation function
//! with typed parameters. [`compile`] turns the invokable ones into a
//! provider-neutral [`ToolSchema`], or nothing at all when no task is
//! invokable.
//!
//! ## Turn resolution
//!
//! The model may answer with a structured function call, plain text, or a
//! call it wrote into the text. [`resolve_response`] turns any of these into
//! one [`AssistantReply`], recovering embedded calls through pluggable
//! [`RecoveryStrategy`]s.

pub mod catalog;
pub mod conversation;
pub mod core;
pub mod dispatch;
pub mod prompt;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use catalog::{
    AutomationFunction, CatalogIssue, CatalogIssueCode, Parameter, ParameterType, Severity, Task,
    find_by_function, validate_catalog,
};
pub use conversation::{ConversationTurn, PendingCall, TurnRole, last_executed_function};
pub use core::error::DomainError;
pub use dispatch::{
    Acknowledgments, AssistantReply, FencedJsonRecovery, FunctionCall, RecoveryStrategy,
    ReplyOrigin, Resolution, default_strategies, resolve_response,
};
pub use prompt::{AssistantContext, SystemInstruction};
pub use session::{
    BlockThreshold, ContentPart, FinishReason, GenerationParams, HarmCategory, ModelResponse,
    SafetyProfile,
};
pub use tool::{
    CompiledTools, FunctionDeclaration, ParameterObject, PrimitiveType, PropertySchema,
    RequiredPolicy, ToolSchema, ToolSchemaCompiler, UnmappedType, compile,
};
