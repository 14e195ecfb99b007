//! Task catalog domain module
//!
//! A business configures *tasks* for its assistant. A task optionally points
//! at an [`AutomationFunction`] with typed [`Parameter`]s, and may require
//! extra CRM custom fields to be collected before the function runs.
//!
//! ```text
//! Task ──▶ AutomationFunction ──▶ Parameter[]
//!   └──▶ required_custom_fields: Parameter[]   (merged, function wins)
//! ```
//!
//! The catalog itself lives in the business store; this module only models
//! the definitions handed to the dispatch engine for one call.

pub mod entities;
pub mod parameter_type;
pub mod validation;

pub use entities::{AutomationFunction, Parameter, Task, find_by_function};
pub use parameter_type::ParameterType;
pub use validation::{CatalogIssue, CatalogIssueCode, Severity, validate_catalog};
