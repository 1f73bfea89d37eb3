//! Dynamically typed values produced by the type registry.
//!
//! Responsibilities:
//! - Define the `Value` sum type carried between the validators and field slots.
//! - Define `ValueKind`, the discriminant used for mismatch reporting.
//!
//! Invariants:
//! - `Display` renders the bare literal, so a rendered value parses back to
//!   the same `Value` with the type it was validated as.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Str,
    Int,
    Float,
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Str => "string",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Bool => "boolean",
        };
        f.write_str(name)
    }
}

/// A validated configuration value.
///
/// The default is the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Default for Value {
    fn default() -> Self {
        Value::Str(String::new())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_string() {
        assert_eq!(Value::default(), Value::Str(String::new()));
        assert_eq!(Value::default().kind(), ValueKind::Str);
    }

    #[test]
    fn test_display_renders_bare_literal() {
        assert_eq!(Value::from("dev").to_string(), "dev");
        assert_eq!(Value::Int(-42).to_string(), "-42");
        assert_eq!(Value::Float(3.5).to_string(), "3.5");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_accessors_match_kind() {
        let value = Value::Int(8080);
        assert_eq!(value.kind(), ValueKind::Int);
        assert_eq!(value.as_int(), Some(8080));
        assert_eq!(value.as_str(), None);
        assert_eq!(value.as_bool(), None);
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&vec![Value::from("a"), Value::Int(1), Value::Bool(true)])
            .unwrap();
        assert_eq!(json, r#"["a",1,true]"#);
    }
}
