//! Application-level configuration.
//!
//! - [`ResolverConfig`]: model, generation, safety, deadline and reply texts

pub mod resolver_config;

pub use resolver_config::{DEFAULT_DEADLINE, DEFAULT_MODEL, ResolverConfig};
