//! Conversation history and caller-owned multi-turn state.

pub mod pending;
pub mod turn;

pub use pending::PendingCall;
pub use turn::{ConversationTurn, TurnRole, last_executed_function};
