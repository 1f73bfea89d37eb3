//! Variable descriptors and the resolution policy.
//!
//! Responsibilities:
//! - Define `Variable<T>`, the rule descriptor for one configuration value.
//! - Provide the standalone constructors (`string`, `port`, ...) and the
//!   consuming builder methods.
//! - Resolve a variable against an `Environment`: environment value, then
//!   default, then optional zero, then `MissingValue`.
//!
//! Does NOT handle:
//! - Parsing rule strings (see `loader::rule`).
//! - Writing values into structures (see `loader::fields`).
//!
//! Invariants:
//! - Absent keys and empty values are both "no value"; `"0"` and `"false"`
//!   are present values.
//! - A default wins over `optional`.
//! - `oneof` is checked on the validated value, before the custom validator.
//! - The custom validator only runs on values read from the environment.
//! - Errors leaving `load_from` are wrapped with the variable name.

use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, EnvError};
use crate::loader::{Environment, ProcessEnv, lookup};
use crate::types::{Value, VariableType};
use crate::validation::check_oneof;

/// Rust types a [`Variable`] can resolve to.
pub trait EnvValue: Clone + PartialEq + fmt::Debug + fmt::Display {
    /// Convert a validated value, or `None` if the kinds do not match.
    fn from_value(value: Value) -> Option<Self>;

    /// Value used for an optional variable that has no value.
    fn zero(ty: VariableType) -> Self;
}

impl EnvValue for String {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    fn zero(_ty: VariableType) -> Self {
        String::new()
    }
}

impl EnvValue for i64 {
    fn from_value(value: Value) -> Option<Self> {
        value.as_int()
    }

    fn zero(_ty: VariableType) -> Self {
        0
    }
}

impl EnvValue for u16 {
    fn from_value(value: Value) -> Option<Self> {
        value.as_int().and_then(|i| u16::try_from(i).ok())
    }

    fn zero(_ty: VariableType) -> Self {
        0
    }
}

impl EnvValue for f64 {
    fn from_value(value: Value) -> Option<Self> {
        value.as_float()
    }

    fn zero(_ty: VariableType) -> Self {
        0.0
    }
}

impl EnvValue for bool {
    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }

    fn zero(_ty: VariableType) -> Self {
        false
    }
}

impl EnvValue for Value {
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }

    fn zero(ty: VariableType) -> Self {
        ty.zero()
    }
}

/// Caller-supplied check or transform applied after built-in validation.
pub type Validator<T> = Arc<dyn Fn(T) -> Result<T, BoxError> + Send + Sync>;

/// Which branch of the resolution policy produced a value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resolution<T> {
    Environment(T),
    Default(T),
    Zero,
}

impl<T> Resolution<T> {
    fn source(&self) -> &'static str {
        match self {
            Resolution::Environment(_) => "environment",
            Resolution::Default(_) => "default",
            Resolution::Zero => "zero",
        }
    }

    fn into_value(self) -> Option<T> {
        match self {
            Resolution::Environment(value) | Resolution::Default(value) => Some(value),
            Resolution::Zero => None,
        }
    }
}

/// Rule descriptor for one configuration variable.
///
/// Built with a constructor such as [`port`] and refined with the consuming
/// builder methods:
///
/// ```
/// use std::collections::HashMap;
///
/// let env = HashMap::from([("APP_PORT", "8443")]);
/// let port = envrule::port("APP_PORT")
///     .oneof([443, 8443])
///     .default(443)
///     .desc("HTTPS listener port")
///     .load_from(&env)
///     .unwrap();
/// assert_eq!(port, 8443);
/// ```
#[derive(Clone)]
pub struct Variable<T: EnvValue> {
    name: String,
    ty: VariableType,
    default: Option<T>,
    optional: bool,
    oneof: Vec<T>,
    description: String,
    validator: Option<Validator<T>>,
}

impl<T: EnvValue> Variable<T> {
    /// Create a required variable without constraints.
    pub fn new(name: impl Into<String>, ty: VariableType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            optional: false,
            oneof: Vec::new(),
            description: String::new(),
            validator: None,
        }
    }

    /// Resolve to the zero value instead of failing when no value is set.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Restrict the accepted values; an empty set means unconstrained.
    pub fn oneof(mut self, choices: impl IntoIterator<Item = T>) -> Self {
        self.oneof = choices.into_iter().collect();
        self
    }

    /// Value used when the variable is unset or empty.
    pub fn default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    pub fn desc(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach a check or transform run after built-in validation.
    ///
    /// Its error is returned as `EnvError::Validation` and can be recovered
    /// with [`EnvError::find`].
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: Fn(T) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn var_type(&self) -> VariableType {
        self.ty
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn choices(&self) -> &[T] {
        &self.oneof
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Load from the process environment.
    pub fn load(&self) -> Result<T, EnvError> {
        self.load_from(&ProcessEnv)
    }

    /// Load from the given environment.
    pub fn load_from<E: Environment + ?Sized>(&self, env: &E) -> Result<T, EnvError> {
        Ok(self
            .resolve_from(env)?
            .unwrap_or_else(|| T::zero(self.ty)))
    }

    /// Like [`Variable::load`], but panics with the `EnvError` as payload.
    pub fn must_load(&self) -> T {
        self.must_load_from(&ProcessEnv)
    }

    /// Like [`Variable::load_from`], but panics with the `EnvError` as payload.
    pub fn must_load_from<E: Environment + ?Sized>(&self, env: &E) -> T {
        match self.load_from(env) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(error = %err, "failed to load required configuration");
                std::panic::panic_any(err)
            }
        }
    }

    /// Resolve with the name attached to errors; `None` means optional zero.
    pub(crate) fn resolve_from<E: Environment + ?Sized>(
        &self,
        env: &E,
    ) -> Result<Option<T>, EnvError> {
        match self.resolve(env) {
            Ok(resolution) => {
                tracing::debug!(
                    variable = %self.name,
                    source = resolution.source(),
                    "resolved variable"
                );
                Ok(resolution.into_value())
            }
            Err(err) => Err(err.for_variable(&self.name)),
        }
    }

    pub(crate) fn resolve<E: Environment + ?Sized>(
        &self,
        env: &E,
    ) -> Result<Resolution<T>, EnvError> {
        if self.name.is_empty() {
            return Err(EnvError::MissingName);
        }

        let Some(raw) = lookup(env, &self.name) else {
            if let Some(default) = &self.default {
                return Ok(Resolution::Default(default.clone()));
            }
            if self.optional {
                return Ok(Resolution::Zero);
            }
            return Err(EnvError::MissingValue);
        };

        let mut value = self.validate_raw(&raw)?;
        if let Some(validator) = &self.validator {
            value = validator(value).map_err(EnvError::Validation)?;
        }

        Ok(Resolution::Environment(value))
    }

    /// Built-in validation plus the `oneof` check.
    pub(crate) fn validate_raw(&self, raw: &str) -> Result<T, EnvError> {
        let value = self.ty.validate(raw)?;
        let kind = value.kind();
        let typed = T::from_value(value).ok_or_else(|| EnvError::Unexpected {
            subject: self.name.clone(),
            reason: format!(
                "{kind} value of type '{}' does not convert to {}",
                self.ty,
                std::any::type_name::<T>()
            ),
        })?;

        check_oneof(&typed, &self.oneof)?;
        Ok(typed)
    }
}

impl<T: EnvValue> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("type", &self.ty)
            .field("default", &self.default)
            .field("optional", &self.optional)
            .field("oneof", &self.oneof)
            .field("description", &self.description)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// Renders a usage line: `NAME (type, default=..., optional, oneof=a|b): description`.
impl<T: EnvValue> fmt::Display for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.name, self.ty)?;
        if let Some(default) = &self.default {
            write!(f, ", default={default}")?;
        }
        if self.optional {
            f.write_str(", optional")?;
        }
        if !self.oneof.is_empty() {
            let choices: Vec<String> = self.oneof.iter().map(ToString::to_string).collect();
            write!(f, ", oneof={}", choices.join("|"))?;
        }
        f.write_str(")")?;
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}

/// A variable holding any string.
pub fn string(name: impl Into<String>) -> Variable<String> {
    Variable::new(name, VariableType::String)
}

/// A variable holding a base-10 signed integer.
pub fn int(name: impl Into<String>) -> Variable<i64> {
    Variable::new(name, VariableType::Int)
}

/// A variable holding a decimal number.
pub fn float(name: impl Into<String>) -> Variable<f64> {
    Variable::new(name, VariableType::Float)
}

/// A variable holding a boolean (`true`, `false`, `1`, `0`, `on`, `off`).
pub fn boolean(name: impl Into<String>) -> Variable<bool> {
    Variable::new(name, VariableType::Boolean)
}

/// A variable holding a TCP port number (1-65535).
pub fn port(name: impl Into<String>) -> Variable<u16> {
    Variable::new(name, VariableType::Port)
}

/// A variable holding an absolute URL with a scheme and a host.
pub fn url(name: impl Into<String>) -> Variable<String> {
    Variable::new(name, VariableType::Url)
}

/// A variable holding an email address.
pub fn email(name: impl Into<String>) -> Variable<String> {
    Variable::new(name, VariableType::Email)
}
