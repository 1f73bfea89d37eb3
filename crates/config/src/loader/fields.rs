//! Field descriptors: how the loader discovers and writes structure fields.
//!
//! Responsibilities:
//! - Define `EnvStruct`, implemented by configuration structures (usually via
//!   `env_struct!`), which yields one `Field` per field carrying a rule.
//! - Define `SetValue`, the conversion from a validated `Value` into a field.
//!
//! Invariants:
//! - `SetValue` never coerces between kinds except integer to float.
//! - Integer narrowing is checked; out-of-range values are rejected, not
//!   truncated.
//! - A rejected value leaves the field unchanged.

use std::path::PathBuf;

use crate::types::Value;

/// Writes a validated value into a structure field.
pub trait SetValue {
    /// Store `value`, or explain why this field cannot hold it.
    fn set_value(&mut self, value: Value) -> Result<(), String>;
}

fn mismatch(expected: &str, value: &Value) -> String {
    format!("expected {expected}, got {} value '{value}'", value.kind())
}

impl SetValue for String {
    fn set_value(&mut self, value: Value) -> Result<(), String> {
        match value {
            Value::Str(s) => {
                *self = s;
                Ok(())
            }
            other => Err(mismatch("string", &other)),
        }
    }
}

impl SetValue for bool {
    fn set_value(&mut self, value: Value) -> Result<(), String> {
        match value {
            Value::Bool(b) => {
                *self = b;
                Ok(())
            }
            other => Err(mismatch("boolean", &other)),
        }
    }
}

impl SetValue for f64 {
    fn set_value(&mut self, value: Value) -> Result<(), String> {
        match value {
            Value::Float(f) => *self = f,
            Value::Int(i) => *self = i as f64,
            other => return Err(mismatch("number", &other)),
        }
        Ok(())
    }
}

impl SetValue for f32 {
    fn set_value(&mut self, value: Value) -> Result<(), String> {
        match value {
            Value::Float(f) => *self = f as f32,
            Value::Int(i) => *self = i as f32,
            other => return Err(mismatch("number", &other)),
        }
        Ok(())
    }
}

/// Implement `SetValue` for integer types with checked narrowing.
macro_rules! impl_set_value_int {
    ($($int:ty),* $(,)?) => {
        $(
            impl SetValue for $int {
                fn set_value(&mut self, value: Value) -> Result<(), String> {
                    match value {
                        Value::Int(i) => {
                            *self = <$int>::try_from(i).map_err(|_| {
                                format!("{i} does not fit in {}", stringify!($int))
                            })?;
                            Ok(())
                        }
                        other => Err(mismatch("integer", &other)),
                    }
                }
            }
        )*
    };
}

impl_set_value_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: SetValue + Default> SetValue for Option<T> {
    fn set_value(&mut self, value: Value) -> Result<(), String> {
        let mut inner = T::default();
        inner.set_value(value)?;
        *self = Some(inner);
        Ok(())
    }
}

impl SetValue for PathBuf {
    fn set_value(&mut self, value: Value) -> Result<(), String> {
        match value {
            Value::Str(s) => {
                *self = PathBuf::from(s);
                Ok(())
            }
            other => Err(mismatch("path", &other)),
        }
    }
}

impl SetValue for url::Url {
    fn set_value(&mut self, value: Value) -> Result<(), String> {
        match value {
            Value::Str(s) => {
                *self = url::Url::parse(&s).map_err(|e| format!("'{s}' is not a URL: {e}"))?;
                Ok(())
            }
            other => Err(mismatch("URL", &other)),
        }
    }
}

impl SetValue for Value {
    fn set_value(&mut self, value: Value) -> Result<(), String> {
        *self = value;
        Ok(())
    }
}

/// One loadable field of a configuration structure.
pub struct Field<'a> {
    name: &'a str,
    rule: Option<&'a str>,
    slot: &'a mut dyn SetValue,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, rule: Option<&'a str>, slot: &'a mut dyn SetValue) -> Self {
        Self { name, rule, slot }
    }

    /// The Rust field name, used in error messages.
    pub fn name(&self) -> &str {
        self.name
    }

    /// The declarative rule, if the field has one.
    pub fn rule(&self) -> Option<&str> {
        self.rule
    }

    pub fn set(&mut self, value: Value) -> Result<(), String> {
        self.slot.set_value(value)
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}

/// A structure that can be populated from environment variables.
///
/// Usually generated by [`env_struct!`](crate::env_struct). Manual
/// implementations return the fields in declaration order, and return
/// `Err(reason)` when the structure cannot be described.
pub trait EnvStruct: Default {
    fn fields(&mut self) -> Result<Vec<Field<'_>>, String>;
}
