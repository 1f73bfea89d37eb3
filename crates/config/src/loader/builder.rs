//! Structure loader implementation.
//!
//! Responsibilities:
//! - Provide `Loader`, which populates `EnvStruct` targets field by field.
//! - Layer an optional in-memory `.env` overlay under the primary source.
//! - Describe a structure's variables without reading any environment.
//!
//! Does NOT handle:
//! - Rule string syntax (delegated to rule.rs).
//! - Value resolution and validation (delegated to `Variable`).
//!
//! Invariants / Assumptions:
//! - Fields are processed in declaration order and the first error aborts the load.
//! - Fields without a rule, with `-`, or without `name` are never looked up.
//! - Optional-zero resolutions leave the field untouched.
//! - Non-empty values from the primary source win over `.env` values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before any `.env` file is read.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use super::env::{DotenvError, Environment, ProcessEnv, lookup, read_dotenv};
use super::fields::EnvStruct;
use super::rule::parse_rule;
use crate::constants::DOTENV_DISABLED_VAR;
use crate::error::EnvError;
use crate::types::Value;
use crate::variable::Variable;

/// Loads configuration structures from an environment source.
///
/// ```
/// use std::collections::HashMap;
///
/// envrule::env_struct! {
///     #[derive(Debug, Default)]
///     struct Server {
///         host: String = "name=HOST, default=localhost",
///         debug: bool = "name=DEBUG, type=bool, optional",
///     }
/// }
///
/// let env = HashMap::from([("DEBUG", "on")]);
/// let server: Server = envrule::Loader::with_env(env).load().unwrap();
/// assert_eq!(server.host, "localhost");
/// assert!(server.debug);
/// ```
pub struct Loader<'a> {
    env: Box<dyn Environment + 'a>,
    dotenv: HashMap<String, String>,
}

impl Default for Loader<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Loader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("dotenv_keys", &self.dotenv.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Loader<'a> {
    /// Create a loader reading the process environment.
    pub fn new() -> Self {
        Self::with_env(ProcessEnv)
    }

    /// Create a loader reading `env` instead of the process environment.
    pub fn with_env(env: impl Environment + 'a) -> Self {
        Self {
            env: Box::new(env),
            dotenv: HashMap::new(),
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            ProcessEnv.get(DOTENV_DISABLED_VAR).as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Read `.env` from the working directory or its ancestors into the overlay.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", no file is read. The
    /// process environment is never modified.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`DotenvError::Parse`)
    /// - The `.env` file exists but cannot be read (`DotenvError::Io`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, DotenvError> {
        self.merge_dotenv(None)
    }

    /// Like [`Loader::load_dotenv`], but reads the file at `path`.
    pub fn load_dotenv_from(self, path: impl AsRef<Path>) -> Result<Self, DotenvError> {
        self.merge_dotenv(Some(path.as_ref()))
    }

    fn merge_dotenv(mut self, path: Option<&Path>) -> Result<Self, DotenvError> {
        if Self::dotenv_disabled() {
            tracing::debug!("skipping .env loading, {DOTENV_DISABLED_VAR} is set");
            return Ok(self);
        }

        match read_dotenv(path)? {
            Some(values) => {
                tracing::debug!(keys = values.len(), "loaded .env file");
                for (key, value) in values {
                    self.dotenv.entry(key).or_insert(value);
                }
            }
            None => tracing::debug!("no .env file found"),
        }
        Ok(self)
    }

    /// Load a fresh `T`, starting from `T::default()`.
    ///
    /// No structure is returned on error; use `T::default()` for the zero
    /// value, or [`Loader::load_into`] to keep fields loaded before the failure.
    pub fn load<T: EnvStruct>(&self) -> Result<T, EnvError> {
        let mut target = T::default();
        self.load_into(&mut target)?;
        Ok(target)
    }

    /// Populate an existing `target`.
    ///
    /// On error, fields processed before the failing one keep their new
    /// values.
    pub fn load_into<T: EnvStruct>(&self, target: &mut T) -> Result<(), EnvError> {
        let type_name = std::any::type_name::<T>();
        let fields = target
            .fields()
            .map_err(|reason| EnvError::UnsupportedType {
                type_name: type_name.to_string(),
                reason,
            })?;

        tracing::debug!(target_type = type_name, fields = fields.len(), "loading configuration");

        for mut field in fields {
            let Some(rule) = field.rule() else {
                continue;
            };

            let variable = parse_rule(field.name(), rule)?;
            if variable.name().is_empty() {
                tracing::debug!(field = field.name(), "skipping field without variable name");
                continue;
            }

            let Some(value) = variable.resolve_from(self)? else {
                continue;
            };

            field.set(value).map_err(|reason| EnvError::SetField {
                field: field.name().to_string(),
                reason,
            })?;
        }

        Ok(())
    }

    /// Like [`Loader::load`], but panics with the `EnvError` as payload.
    pub fn must_load<T: EnvStruct>(&self) -> T {
        match self.load() {
            Ok(target) => target,
            Err(err) => {
                tracing::error!(
                    error = %err,
                    target_type = std::any::type_name::<T>(),
                    "failed to load required configuration"
                );
                std::panic::panic_any(err)
            }
        }
    }
}

impl Environment for Loader<'_> {
    fn get(&self, key: &str) -> Option<String> {
        lookup(&*self.env, key).or_else(|| self.dotenv.get(key).cloned())
    }
}

/// Load `T` from the process environment.
pub fn load<T: EnvStruct>() -> Result<T, EnvError> {
    Loader::new().load()
}

/// Load `T` from the process environment, panicking with the `EnvError`.
pub fn must_load<T: EnvStruct>() -> T {
    Loader::new().must_load()
}

/// The variables `T` would read, in field order, without reading them.
///
/// Skipped fields are left out.
pub fn describe<T: EnvStruct>() -> Result<Vec<Variable<Value>>, EnvError> {
    let mut target = T::default();
    let fields = target
        .fields()
        .map_err(|reason| EnvError::UnsupportedType {
            type_name: std::any::type_name::<T>().to_string(),
            reason,
        })?;

    let mut variables = Vec::with_capacity(fields.len());
    for field in &fields {
        if let Some(rule) = field.rule() {
            let variable = parse_rule(field.name(), rule)?;
            if !variable.name().is_empty() {
                variables.push(variable);
            }
        }
    }
    Ok(variables)
}
