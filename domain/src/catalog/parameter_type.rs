//! Domain data types for task and custom-field parameters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Data type of a function parameter or CRM custom field, as stored by the
/// business administration side.
///
/// Values coming from storage are free-form strings; anything that matches
/// none of the known names is kept as [`ParameterType::Unrecognized`] so the
/// schema compiler can fall back to `string` and report it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ParameterType {
    #[default]
    Text,
    Email,
    Phone,
    Address,
    Date,
    DateTime,
    SingleChoice,
    Number,
    Decimal,
    Integer,
    Boolean,
    MultiChoice,
    /// A stored type name this crate does not know how to map.
    Unrecognized(String),
}

impl ParameterType {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::Text => "text",
            ParameterType::Email => "email",
            ParameterType::Phone => "phone",
            ParameterType::Address => "address",
            ParameterType::Date => "date",
            ParameterType::DateTime => "datetime",
            ParameterType::SingleChoice => "single_choice",
            ParameterType::Number => "number",
            ParameterType::Decimal => "decimal",
            ParameterType::Integer => "integer",
            ParameterType::Boolean => "boolean",
            ParameterType::MultiChoice => "multi_choice",
            ParameterType::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ParameterType::Unrecognized(_))
    }
}

impl FromStr for ParameterType {
    type Err = std::convert::Infallible;

    /// Parse a stored type name. Never fails: unknown names become
    /// [`ParameterType::Unrecognized`] with the original spelling.
    ///
    /// Accepts the canonical names, camelCase/snake_case spellings and the
    /// Spanish aliases the admin panel writes (`texto`, `entero`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let parsed = match normalized.as_str() {
            "text" | "texto" | "string" => ParameterType::Text,
            "email" | "correo" => ParameterType::Email,
            "phone" | "telefono" | "teléfono" => ParameterType::Phone,
            "address" | "direccion" | "dirección" => ParameterType::Address,
            "date" | "fecha" => ParameterType::Date,
            "datetime" | "date_time" | "fechahora" | "fecha_hora" => ParameterType::DateTime,
            "singlechoice" | "single_choice" | "seleccion_unica" => ParameterType::SingleChoice,
            "number" | "numero" | "número" | "float" => ParameterType::Number,
            "decimal" => ParameterType::Decimal,
            "integer" | "int" | "entero" => ParameterType::Integer,
            "boolean" | "bool" | "booleano" => ParameterType::Boolean,
            "multichoice" | "multi_choice" | "seleccion_multiple" | "array" => {
                ParameterType::MultiChoice
            }
            _ => ParameterType::Unrecognized(s.to_string()),
        };
        Ok(parsed)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ParameterType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParameterType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Infallible
        Ok(raw.parse().unwrap_or_default())
    }
}
