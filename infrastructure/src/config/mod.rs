//! Configuration file loading for assistant-dispatch
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DISPATCH_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./dispatch.toml` or `./.dispatch.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/assistant-dispatch/config.toml`
//! 5. Fallback: `~/.config/assistant-dispatch/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAssistantConfig, FileConfig, FileFixtureConfig, FileGeminiConfig,
    FileLoggingConfig, FileProviderConfig, FileResolverConfig, ProviderKind,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
