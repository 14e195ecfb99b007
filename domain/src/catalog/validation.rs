//! Task catalog validation.
//!
//! The schema compiler assumes a well-formed catalog. Callers that load
//! definitions from storage or files run [`validate_catalog`] first and
//! refuse to continue on [`Severity::Error`] issues.
//!
//! # Examples
//!
//! ```
//! use dispatch_domain::catalog::{AutomationFunction, Task, validate_catalog};
//!
//! let tasks = vec![
//!     Task::new("t1", "Book").with_function(AutomationFunction::new("agendarCita")),
//!     Task::new("t2", "Rebook").with_function(AutomationFunction::new("agendarCita")),
//! ];
//! let issues = validate_catalog(&tasks);
//! assert_eq!(issues.len(), 1);
//! ```

use super::entities::Task;
use std::collections::HashSet;

/// Severity level of a catalog issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The catalog cannot be compiled into a usable schema.
    Error,
    /// The catalog compiles but the model may see something unexpected.
    Warning,
}

/// Identifies a specific catalog issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogIssueCode {
    /// A function has an empty name.
    EmptyFunctionName,
    /// Two tasks expose functions with the same name.
    DuplicateFunctionName,
    /// A parameter or custom field has an empty name.
    EmptyParameterName,
    /// A function declares the same parameter name twice.
    DuplicateParameterName,
    /// A custom field is shadowed by a function parameter of the same name.
    ShadowedCustomField,
}

/// A detected issue in the catalog.
#[derive(Debug, Clone)]
pub struct CatalogIssue {
    pub severity: Severity,
    pub code: CatalogIssueCode,
    pub task_id: String,
    pub message: String,
}

impl CatalogIssue {
    fn new(severity: Severity, code: CatalogIssueCode, task: &Task, message: String) -> Self {
        Self {
            severity,
            code,
            task_id: task.id.clone(),
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Validate a task catalog, returning every detected issue.
///
/// Tasks without an automation function are skipped; they never reach
/// the tool schema.
pub fn validate_catalog(tasks: &[Task]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut function_names: HashSet<&str> = HashSet::new();

    for task in tasks {
        let Some(function) = &task.automation_function else {
            continue;
        };

        if function.name.trim().is_empty() {
            issues.push(CatalogIssue::new(
                Severity::Error,
                CatalogIssueCode::EmptyFunctionName,
                task,
                format!("task '{}' has a function with an empty name", task.name),
            ));
        } else if !function_names.insert(function.name.as_str()) {
            issues.push(CatalogIssue::new(
                Severity::Error,
                CatalogIssueCode::DuplicateFunctionName,
                task,
                format!(
                    "function '{}' is exposed by more than one task",
                    function.name
                ),
            ));
        }

        let mut param_names: HashSet<&str> = HashSet::new();
        for param in &function.parameters {
            if param.name.trim().is_empty() {
                issues.push(CatalogIssue::new(
                    Severity::Error,
                    CatalogIssueCode::EmptyParameterName,
                    task,
                    format!("function '{}' has a parameter with an empty name", function.name),
                ));
            } else if !param_names.insert(param.name.as_str()) {
                issues.push(CatalogIssue::new(
                    Severity::Error,
                    CatalogIssueCode::DuplicateParameterName,
                    task,
                    format!(
                        "function '{}' declares parameter '{}' twice",
                        function.name, param.name
                    ),
                ));
            }
        }

        for field in &task.required_custom_fields {
            if field.name.trim().is_empty() {
                issues.push(CatalogIssue::new(
                    Severity::Error,
                    CatalogIssueCode::EmptyParameterName,
                    task,
                    format!("task '{}' requires a custom field with an empty name", task.name),
                ));
            } else if param_names.contains(field.name.as_str()) {
                issues.push(CatalogIssue::new(
                    Severity::Warning,
                    CatalogIssueCode::ShadowedCustomField,
                    task,
                    format!(
                        "custom field '{}' is already a parameter of '{}' and will be ignored",
                        field.name, function.name
                    ),
                ));
            }
        }
    }

    issues
}
