//! Task catalog entities

use super::parameter_type::ParameterType;
use serde::{Deserialize, Serialize};

/// A typed input of an automation function or a task's required custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name sent to the model (snake_case by convention, e.g. "fecha_hora_deseada")
    pub name: String,
    /// Stored data type
    #[serde(default, rename = "type", alias = "domain_type")]
    pub domain_type: ParameterType,
    /// Description written for the model
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the business dispatch layer needs this value
    #[serde(default)]
    pub required: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, domain_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            domain_type,
            description: None,
            required: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// An invokable function backing a task.
///
/// `name` is the protocol call name and must be unique across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationFunction {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl AutomationFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameter(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }
}

/// A capability an assistant is subscribed to.
///
/// Only tasks with an [`AutomationFunction`] are offered to the model as tools;
/// the rest are informational and never reach the tool schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Description shown to the model, overriding the function's own description.
    #[serde(default)]
    pub tool_description: Option<String>,
    /// Follow-up instruction for the model once this task's function has run.
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub automation_function: Option<AutomationFunction>,
    /// CRM custom fields the task needs collected, merged into the function's parameters.
    #[serde(default)]
    pub required_custom_fields: Vec<Parameter>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            tool_description: None,
            instruction: None,
            automation_function: None,
            required_custom_fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tool_description(mut self, description: impl Into<String>) -> Self {
        self.tool_description = Some(description.into());
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn with_function(mut self, function: AutomationFunction) -> Self {
        self.automation_function = Some(function);
        self
    }

    pub fn with_custom_field(mut self, field: Parameter) -> Self {
        self.required_custom_fields.push(field);
        self
    }

    /// Name of the backing function, if any.
    pub fn function_name(&self) -> Option<&str> {
        self.automation_function.as_ref().map(|f| f.name.as_str())
    }

    pub fn is_invokable(&self) -> bool {
        self.automation_function.is_some()
    }
}

/// Find the task whose automation function has the given name.
pub fn find_by_function<'a>(tasks: &'a [Task], function_name: &str) -> Option<&'a Task> {
    tasks
        .iter()
        .find(|t| t.function_name() == Some(function_name))
}

/// Returns `Some(s)` only when `s` has visible content.
pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("t1", "Book appointment")
            .with_tool_description("Books an appointment")
            .with_function(
                AutomationFunction::new("agendarCita").with_parameter(
                    Parameter::new("fecha", ParameterType::Date)
                        .with_description("Desired date")
                        .required(),
                ),
            );

        assert!(task.is_invokable());
        assert_eq!(task.function_name(), Some("agendarCita"));
        let params = &task.automation_function.as_ref().unwrap().parameters;
        assert_eq!(params.len(), 1);
        assert!(params[0].required);
    }

    #[test]
    fn test_find_by_function() {
        let tasks = vec![
            Task::new("t1", "Info"),
            Task::new("t2", "Book").with_function(AutomationFunction::new("agendarCita")),
        ];

        assert_eq!(find_by_function(&tasks, "agendarCita").unwrap().id, "t2");
        assert!(find_by_function(&tasks, "cancelarCita").is_none());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = serde_json::json!({
            "id": "t1",
            "name": "Book",
            "automation_function": {
                "name": "agendarCita",
                "parameters": [
                    { "name": "fecha", "type": "fecha", "required": true }
                ]
            },
            "required_custom_fields": [
                { "name": "email", "type": "email" }
            ]
        });

        let task: Task = serde_json::from_value(json).unwrap();
        let function = task.automation_function.unwrap();
        assert_eq!(function.parameters[0].domain_type, ParameterType::Date);
        assert!(function.parameters[0].description.is_none());
        assert_eq!(task.required_custom_fields[0].domain_type, ParameterType::Email);
        assert!(!task.required_custom_fields[0].required);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("x")), Some("x"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
