//! Prompt domain
//!
//! The system instruction sent with every turn.

pub mod system;

pub use system::{AssistantContext, SystemInstruction};
