//! Error types for variable validation and configuration loading.
//!
//! Responsibilities:
//! - Define one variant per failure kind of the validation and loading pipeline.
//! - Provide kind checks that look through the context wrappers.
//! - Carry caller-supplied validator errors verbatim so they can be downcast.
//!
//! Does NOT handle:
//! - `.env` file errors (see `loader::env::DotenvError`).
//!
//! Invariants:
//! - Every failure has exactly one primary `ErrorKind`.
//! - `EnvError::Variable` only adds the variable name; it never changes the kind.
//! - `is()` and `find()` walk the whole wrap chain.

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error returned by caller-supplied validators.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Discriminant of an [`EnvError`], suitable for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPort,
    InvalidUrl,
    InvalidEmail,
    InvalidBool,
    InvalidInt,
    InvalidFloat,
    UnknownType,
    NotInOneof,
    MissingValue,
    MissingName,
    InvalidTag,
    SetField,
    UnsupportedType,
    Unexpected,
    /// Raised by a caller-supplied validator.
    Validation,
}

/// Errors that can occur while validating variables or loading configuration.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("invalid port: {detail}")]
    InvalidPort { detail: String },

    #[error("invalid url: {detail}")]
    InvalidUrl { detail: String },

    #[error("invalid email: {detail}")]
    InvalidEmail { detail: String },

    #[error("invalid boolean value: {detail}")]
    InvalidBool { detail: String },

    #[error("invalid int: {detail}")]
    InvalidInt { detail: String },

    #[error("invalid float: {detail}")]
    InvalidFloat { detail: String },

    #[error("unknown variable type '{type_name}'")]
    UnknownType { type_name: String },

    #[error("'{value}' is not a possible choice. Available choices: {choices}")]
    NotInOneof { value: String, choices: String },

    #[error("missing required variable")]
    MissingValue,

    #[error("missing variable name")]
    MissingName,

    /// The declarative rule attached to a field is malformed.
    ///
    /// When the rule was rejected by the type registry (unknown type name,
    /// unparsable default or choice), that error is kept as the source.
    #[error("invalid variable tag for field '{field}': {reason}")]
    InvalidTag {
        field: String,
        reason: String,
        #[source]
        source: Option<Box<EnvError>>,
    },

    #[error("field '{field}' is not settable: {reason}")]
    SetField { field: String, reason: String },

    #[error("unsupported variable type {type_name}: {reason}")]
    UnsupportedType { type_name: String, reason: String },

    #[error("unexpected error for '{subject}': {reason}")]
    Unexpected { subject: String, reason: String },

    /// Error returned by a caller-supplied validator, kept as-is.
    #[error(transparent)]
    Validation(BoxError),

    /// Adds the variable name to an error raised while resolving it.
    ///
    /// The inner error is part of the message, so it is not also reported
    /// as `source()`.
    #[error("variable '{name}': {inner}")]
    Variable { name: String, inner: Box<EnvError> },
}

impl EnvError {
    pub(crate) fn invalid_tag(field: &str, reason: impl Into<String>) -> Self {
        EnvError::InvalidTag {
            field: field.to_string(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_tag_caused_by(
        field: &str,
        reason: impl Into<String>,
        cause: EnvError,
    ) -> Self {
        EnvError::InvalidTag {
            field: field.to_string(),
            reason: reason.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// Wrap this error with the name of the variable being resolved.
    pub(crate) fn for_variable(self, name: &str) -> Self {
        EnvError::Variable {
            name: name.to_string(),
            inner: Box::new(self),
        }
    }

    /// The primary kind of this error, looking through variable context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvError::InvalidPort { .. } => ErrorKind::InvalidPort,
            EnvError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            EnvError::InvalidEmail { .. } => ErrorKind::InvalidEmail,
            EnvError::InvalidBool { .. } => ErrorKind::InvalidBool,
            EnvError::InvalidInt { .. } => ErrorKind::InvalidInt,
            EnvError::InvalidFloat { .. } => ErrorKind::InvalidFloat,
            EnvError::UnknownType { .. } => ErrorKind::UnknownType,
            EnvError::NotInOneof { .. } => ErrorKind::NotInOneof,
            EnvError::MissingValue => ErrorKind::MissingValue,
            EnvError::MissingName => ErrorKind::MissingName,
            EnvError::InvalidTag { .. } => ErrorKind::InvalidTag,
            EnvError::SetField { .. } => ErrorKind::SetField,
            EnvError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            EnvError::Unexpected { .. } => ErrorKind::Unexpected,
            EnvError::Validation(_) => ErrorKind::Validation,
            EnvError::Variable { inner, .. } => inner.kind(),
        }
    }

    /// Whether this error, or any error it wraps, is of the given kind.
    ///
    /// An `InvalidTag` caused by an unknown type name answers `true` for both
    /// `ErrorKind::InvalidTag` and `ErrorKind::UnknownType`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        let mut current = Some(self);
        while let Some(err) = current {
            if err.kind() == kind {
                return true;
            }
            current = err.wrapped();
        }
        false
    }

    /// Find an error of type `E` returned by a caller-supplied validator.
    ///
    /// Walks the wrap chain, then the validator error's own source chain.
    pub fn find<E: StdError + 'static>(&self) -> Option<&E> {
        let mut current = Some(self);
        while let Some(err) = current {
            if let EnvError::Validation(inner) = err {
                let mut cause: Option<&(dyn StdError + 'static)> = Some(inner.as_ref());
                while let Some(c) = cause {
                    if let Some(found) = c.downcast_ref::<E>() {
                        return Some(found);
                    }
                    cause = c.source();
                }
                return None;
            }
            current = err.wrapped();
        }
        None
    }

    /// Name of the variable this error was raised for, if known.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            EnvError::Variable { name, .. } => Some(name),
            _ => None,
        }
    }

    fn wrapped(&self) -> Option<&EnvError> {
        match self {
            EnvError::Variable { inner, .. } => Some(inner),
            EnvError::InvalidTag {
                source: Some(source),
                ..
            } => Some(source),
            _ => None,
        }
    }
}
