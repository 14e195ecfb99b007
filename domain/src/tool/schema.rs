//! Compiled tool schema.
//!
//! Provider-neutral description of the functions offered to the model for a
//! single call. Adapters translate it into their wire format (see the
//! Gemini adapter in the infrastructure crate).
//!
//! A schema is never persisted; it is rebuilt from the task catalog on every
//! call. "No tools" is represented by the absence of a schema
//! (`Option<ToolSchema>::None`), never by an empty function list, since some
//! providers reject an empty tool array.

use crate::catalog::ParameterType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Primitive JSON-schema type understood by tool-calling providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Array => "array",
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a domain parameter type to its protocol primitive.
///
/// | Domain type | Primitive |
/// |-------------|-----------|
/// | text, email, phone, address, date, datetime, single choice | `string` |
/// | number, decimal | `number` |
/// | integer | `integer` |
/// | boolean | `boolean` |
/// | multi choice | `array` |
///
/// Returns `None` for [`ParameterType::Unrecognized`]; the compiler falls
/// back to `string` and reports the unmapped name.
pub fn primitive_for(domain_type: &ParameterType) -> Option<PrimitiveType> {
    match domain_type {
        ParameterType::Text
        | ParameterType::Email
        | ParameterType::Phone
        | ParameterType::Address
        | ParameterType::Date
        | ParameterType::DateTime
        | ParameterType::SingleChoice => Some(PrimitiveType::String),
        ParameterType::Number | ParameterType::Decimal => Some(PrimitiveType::Number),
        ParameterType::Integer => Some(PrimitiveType::Integer),
        ParameterType::Boolean => Some(PrimitiveType::Boolean),
        ParameterType::MultiChoice => Some(PrimitiveType::Array),
        ParameterType::Unrecognized(_) => None,
    }
}

/// Schema of one property in a function's parameter object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub primitive_type: PrimitiveType,
    pub description: String,
    /// Element type for `array` properties (multi-choice values are strings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<PrimitiveType>,
}

impl PropertySchema {
    pub fn new(primitive_type: PrimitiveType, description: impl Into<String>) -> Self {
        let items = (primitive_type == PrimitiveType::Array).then_some(PrimitiveType::String);
        Self {
            primitive_type,
            description: description.into(),
            items,
        }
    }
}

/// The `object` schema describing a function's arguments.
///
/// Properties are kept in a `BTreeMap` so the compiled output is identical
/// for identical input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterObject {
    pub properties: BTreeMap<String, PropertySchema>,
    /// Names the provider must enforce. Empty under [`RequiredPolicy::Omit`](super::compiler::RequiredPolicy).
    #[serde(default)]
    pub required: Vec<String>,
}

impl ParameterObject {
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// One callable function offered to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: ParameterObject,
}

/// The full set of functions offered for one call. Always non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub functions: Vec<FunctionDeclaration>,
}

impl ToolSchema {
    pub fn get(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
