//! Environment sources for variable lookup.
//!
//! Responsibilities:
//! - Define the read-only `Environment` lookup trait.
//! - Provide the process environment and map-backed implementations.
//! - Read `.env` files into an in-memory overlay through `dotenvy`.
//!
//! Does NOT handle:
//! - Deciding precedence between defaults and values (see `variable.rs`).
//!
//! Invariants:
//! - Nothing in this crate writes to the process environment.
//! - `lookup()` treats absent and empty values identically; other values,
//!   including whitespace, are returned untouched.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Read-only key to string lookup.
pub trait Environment {
    /// The value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
///
/// Values that are not valid Unicode are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<K, V, S> Environment for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: std::hash::BuildHasher,
{
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).map(|v| v.as_ref().to_string())
    }
}

impl<K, V> Environment for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).map(|v| v.as_ref().to_string())
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Look up `key`, returning `None` if it is unset or empty.
pub fn lookup<E: Environment + ?Sized>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|value| !value.is_empty())
}

/// Errors raised while reading a `.env` file.
#[derive(Error, Debug)]
pub enum DotenvError {
    /// Invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    Parse { error_index: usize },

    #[error("Failed to read .env file: {kind}")]
    Io { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    Unknown,
}

impl From<dotenvy::Error> for DotenvError {
    fn from(error: dotenvy::Error) -> Self {
        match error {
            dotenvy::Error::LineParse(_, idx) => DotenvError::Parse { error_index: idx },
            dotenvy::Error::Io(io_err) => DotenvError::Io {
                kind: io_err.kind(),
            },
            _ => DotenvError::Unknown,
        }
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == ErrorKind::NotFound
    )
}

/// Read a `.env` file into memory without touching the process environment.
///
/// With `path == None` the file is searched from the working directory
/// upwards. A missing file yields `Ok(None)`.
pub(crate) fn read_dotenv(path: Option<&Path>) -> Result<Option<HashMap<String, String>>, DotenvError> {
    let iter = match path {
        Some(path) => dotenvy::from_path_iter(path),
        None => dotenvy::dotenv_iter(),
    };

    let iter = match iter {
        Ok(iter) => iter,
        Err(e) if is_not_found(&e) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut values = HashMap::new();
    for item in iter {
        let (key, value) = item?;
        values.entry(key).or_insert(value);
    }
    Ok(Some(values))
}
