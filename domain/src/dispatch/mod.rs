//! Turn dispatch: replies, recovery strategies and the resolution algorithm.

pub mod recovery;
pub mod reply;
pub mod resolution;

pub use recovery::{FencedJsonRecovery, RecoveryStrategy, default_strategies, extract_fenced_json};
pub use reply::{AssistantReply, FunctionCall};
pub use resolution::{Acknowledgments, ReplyOrigin, Resolution, resolve_response};
