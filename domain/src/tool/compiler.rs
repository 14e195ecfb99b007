//! Tool schema compiler.
//!
//! Pure translation from the task catalog to a [`ToolSchema`]:
//!
//! 1. Keep only tasks with an automation function.
//! 2. One [`FunctionDeclaration`] per task, named after the function.
//! 3. Properties start from the function's parameters; required custom
//!    fields are added only when the name is still free (first writer wins).
//! 4. Domain types map to primitives via [`primitive_for`]; unknown types
//!    become `string` and are reported in [`CompiledTools::unmapped`].
//! 5. No declarations → no schema.
//!
//! Input is assumed validated (see [`crate::catalog::validate_catalog`]).

use super::schema::{
    FunctionDeclaration, ParameterObject, PrimitiveType, PropertySchema, ToolSchema, primitive_for,
};
use crate::catalog::entities::{Parameter, Task, non_blank};
use serde::{Deserialize, Serialize};

/// Whether the domain `required` flag is forwarded to the provider.
///
/// The default, [`RequiredPolicy::Omit`], never marks a parameter as
/// required: providers hard-reject calls missing a required argument, while
/// the business dispatch layer can ask the user for what is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredPolicy {
    /// Leave `required` empty for every function.
    #[default]
    Omit,
    /// Copy the domain `required` flags into the schema.
    FromDefinitions,
}

impl std::str::FromStr for RequiredPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "omit" => Ok(RequiredPolicy::Omit),
            "from_definitions" | "enforce" => Ok(RequiredPolicy::FromDefinitions),
            other => Err(format!("unknown required policy: {}", other)),
        }
    }
}

/// A parameter whose domain type has no primitive mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedType {
    pub function: String,
    pub parameter: String,
    pub raw_type: String,
}

/// Result of a compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTools {
    /// `None` when no task has an automation function.
    pub schema: Option<ToolSchema>,
    /// Parameters that fell back to `string` because their type is unknown.
    pub unmapped: Vec<UnmappedType>,
}

impl CompiledTools {
    pub fn function_count(&self) -> usize {
        self.schema.as_ref().map_or(0, ToolSchema::len)
    }

    pub fn is_absent(&self) -> bool {
        self.schema.is_none()
    }
}

/// Compiles task catalogs into tool schemas under a [`RequiredPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolSchemaCompiler {
    policy: RequiredPolicy,
}

impl ToolSchemaCompiler {
    pub fn new(policy: RequiredPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RequiredPolicy {
        self.policy
    }

    pub fn compile(&self, tasks: &[Task]) -> CompiledTools {
        let mut unmapped = Vec::new();

        let functions: Vec<FunctionDeclaration> = tasks
            .iter()
            .filter_map(|task| self.declare(task, &mut unmapped))
            .collect();

        let schema = if functions.is_empty() {
            None
        } else {
            Some(ToolSchema { functions })
        };

        CompiledTools { schema, unmapped }
    }

    fn declare(&self, task: &Task, unmapped: &mut Vec<UnmappedType>) -> Option<FunctionDeclaration> {
        let function = task.automation_function.as_ref()?;
        let mut parameters = ParameterObject::default();

        for param in &function.parameters {
            let description = describe(param, "Parameter");
            self.add_property(&mut parameters, &function.name, param, description, unmapped);
        }

        for field in &task.required_custom_fields {
            if parameters.contains(&field.name) {
                continue;
            }
            let description = describe(field, "Custom field");
            self.add_property(&mut parameters, &function.name, field, description, unmapped);
        }

        let description = non_blank(task.tool_description.as_deref())
            .or_else(|| non_blank(function.description.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Executes the action {}", function.name));

        Some(FunctionDeclaration {
            name: function.name.clone(),
            description,
            parameters,
        })
    }

    fn add_property(
        &self,
        parameters: &mut ParameterObject,
        function_name: &str,
        param: &Parameter,
        description: String,
        unmapped: &mut Vec<UnmappedType>,
    ) {
        let primitive = primitive_for(&param.domain_type).unwrap_or_else(|| {
            unmapped.push(UnmappedType {
                function: function_name.to_string(),
                parameter: param.name.clone(),
                raw_type: param.domain_type.to_string(),
            });
            PrimitiveType::String
        });

        parameters
            .properties
            .insert(param.name.clone(), PropertySchema::new(primitive, description));

        if self.policy == RequiredPolicy::FromDefinitions
            && param.required
            && !parameters.required.contains(&param.name)
        {
            parameters.required.push(param.name.clone());
        }
    }
}

fn describe(param: &Parameter, kind: &str) -> String {
    non_blank(param.description.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", kind, param.name))
}

/// Compile with the default policy ([`RequiredPolicy::Omit`]).
pub fn compile(tasks: &[Task]) -> CompiledTools {
    ToolSchemaCompiler::default().compile(tasks)
}
