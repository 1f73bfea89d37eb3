//! The type registry: declared type names, their aliases and validators.
//!
//! Responsibilities:
//! - Map a declared type name (or alias) to a `VariableType`.
//! - Dispatch a raw string to the validator of a `VariableType`.
//! - Provide the value kind and zero value of each type.
//!
//! Does NOT handle:
//! - The per-type parsing rules themselves (see `validation.rs`).
//! - `oneof` membership (see `validation::check_oneof`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::value::{Value, ValueKind};
use crate::error::EnvError;
use crate::validation;

/// The declared type of a configuration variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    String,
    Int,
    Float,
    Boolean,
    Port,
    Url,
    Email,
}

type ValidateFn = fn(&str) -> Result<Value, EnvError>;

/// Every accepted type name, canonical names first.
const REGISTRY: &[(&str, VariableType)] = &[
    ("string", VariableType::String),
    ("int", VariableType::Int),
    ("float", VariableType::Float),
    ("boolean", VariableType::Boolean),
    ("port", VariableType::Port),
    ("url", VariableType::Url),
    ("email", VariableType::Email),
    ("", VariableType::String),
    ("str", VariableType::String),
    ("integer", VariableType::Int),
    ("bool", VariableType::Boolean),
];

impl VariableType {
    /// All types, in declaration order.
    pub const ALL: [VariableType; 7] = [
        VariableType::String,
        VariableType::Int,
        VariableType::Float,
        VariableType::Boolean,
        VariableType::Port,
        VariableType::Url,
        VariableType::Email,
    ];

    /// Look up a type by its canonical name or one of its aliases.
    ///
    /// Matching is case-sensitive; the empty name means `string`.
    pub fn from_name(name: &str) -> Result<Self, EnvError> {
        REGISTRY
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, ty)| *ty)
            .ok_or_else(|| EnvError::UnknownType {
                type_name: name.to_string(),
            })
    }

    /// The canonical name of this type.
    pub fn name(self) -> &'static str {
        match self {
            VariableType::String => "string",
            VariableType::Int => "int",
            VariableType::Float => "float",
            VariableType::Boolean => "boolean",
            VariableType::Port => "port",
            VariableType::Url => "url",
            VariableType::Email => "email",
        }
    }

    /// Kind of the values this type validates into.
    pub fn kind(self) -> ValueKind {
        match self {
            VariableType::String | VariableType::Url | VariableType::Email => ValueKind::Str,
            VariableType::Int | VariableType::Port => ValueKind::Int,
            VariableType::Float => ValueKind::Float,
            VariableType::Boolean => ValueKind::Bool,
        }
    }

    /// The zero value used when an optional variable has no value.
    pub fn zero(self) -> Value {
        match self.kind() {
            ValueKind::Str => Value::Str(String::new()),
            ValueKind::Int => Value::Int(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::Bool => Value::Bool(false),
        }
    }

    /// Parse and validate a raw string as this type.
    pub fn validate(self, raw: &str) -> Result<Value, EnvError> {
        (self.validator())(raw)
    }

    fn validator(self) -> ValidateFn {
        match self {
            VariableType::String => |raw: &str| Ok(Value::Str(raw.to_string())),
            VariableType::Int => |raw: &str| validation::validate_int(raw).map(Value::Int),
            VariableType::Float => |raw: &str| validation::validate_float(raw).map(Value::Float),
            VariableType::Boolean => |raw: &str| validation::validate_boolean(raw).map(Value::Bool),
            VariableType::Port => |raw: &str| validation::validate_port(raw).map(Value::Int),
            VariableType::Url => |raw: &str| validation::validate_url(raw).map(Value::Str),
            VariableType::Email => |raw: &str| validation::validate_email(raw).map(Value::Str),
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VariableType {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
