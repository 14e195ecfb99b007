//! Tool domain module
//!
//! Turns the business task catalog into the set of callable functions
//! offered to the model for one call.
//!
//! ```text
//! ┌──────────────┐  compile   ┌──────────────┐  adapter   ┌──────────────┐
//! │ Task[]       │───────────▶│ ToolSchema?  │───────────▶│ provider     │
//! │ (catalog)    │            │ (neutral)    │            │ tool payload │
//! └──────────────┘            └──────────────┘            └──────────────┘
//! ```
//!
//! - [`compiler`]: pure compilation with a configurable [`RequiredPolicy`]
//! - [`schema`]: the compiled, provider-neutral schema types

pub mod compiler;
pub mod schema;

pub use compiler::{CompiledTools, RequiredPolicy, ToolSchemaCompiler, UnmappedType, compile};
pub use schema::{
    FunctionDeclaration, ParameterObject, PrimitiveType, PropertySchema, ToolSchema, primitive_for,
};
