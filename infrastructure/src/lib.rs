//! Infrastructure layer for assistant-dispatch
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use catalog::{CatalogLoadError, load_catalog, load_history};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAssistantConfig, FileConfig, FileGeminiConfig,
    FileLoggingConfig, FileProviderConfig, FileResolverConfig, ProviderKind,
};
pub use logging::JsonlConversationLogger;
pub use providers::FixtureGateway;
#[cfg(feature = "gemini")]
pub use providers::GeminiGateway;
