//! Built-in validators for each variable type.
//!
//! Responsibilities:
//! - Parse raw strings into typed values for every `VariableType`.
//! - Enforce per-type constraints (port range, URL authority, email syntax).
//! - Check `oneof` membership on already validated values.
//!
//! Does NOT handle:
//! - Deciding whether a variable has a value at all (see `variable.rs`).
//! - Type name lookup (see `types::VariableType`).
//!
//! Invariants:
//! - Validators are pure: the same input always yields the same output or
//!   the same error kind.
//! - Raw values are never trimmed; surrounding whitespace is significant.

use std::fmt;
use url::Url;

use crate::constants::{
    FALSE_LITERALS, MAX_DOMAIN_LABEL_LEN, MAX_EMAIL_DOMAIN_LEN, MAX_EMAIL_LOCAL_LEN, MAX_PORT,
    MIN_PORT, TRUE_LITERALS,
};
use crate::error::EnvError;
use crate::types::{Value, VariableType};

/// Validate `raw` against the type registered under `type_name`.
///
/// ```
/// use envrule::{validate, Value};
///
/// assert_eq!(validate("port", "8080").unwrap(), Value::Int(8080));
/// assert!(validate("bool", "yes").is_err());
/// ```
pub fn validate(type_name: &str, raw: &str) -> Result<Value, EnvError> {
    VariableType::from_name(type_name)?.validate(raw)
}

pub fn validate_int(raw: &str) -> Result<i64, EnvError> {
    raw.parse::<i64>().map_err(|e| EnvError::InvalidInt {
        detail: format!("unable to parse '{raw}' as integer: {e}"),
    })
}

/// Validate a floating point number.
///
/// Finite literals that overflow to infinity are rejected; only an explicit
/// `inf`/`infinity` spelling yields an infinite value.
pub fn validate_float(raw: &str) -> Result<f64, EnvError> {
    let value = raw.parse::<f64>().map_err(|e| EnvError::InvalidFloat {
        detail: format!("unable to parse '{raw}' as float: {e}"),
    })?;

    if value.is_infinite() && !is_infinity_literal(raw) {
        return Err(EnvError::InvalidFloat {
            detail: format!("'{raw}' is out of range"),
        });
    }

    Ok(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

pub fn validate_boolean(raw: &str) -> Result<bool, EnvError> {
    if TRUE_LITERALS.contains(&raw) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&raw) {
        Ok(false)
    } else {
        Err(EnvError::InvalidBool {
            detail: format!(
                "unable to parse '{raw}' as boolean: expected one of {}",
                TRUE_LITERALS
                    .iter()
                    .chain(FALSE_LITERALS)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
    }
}

/// Validate a TCP port number in `1..=65535`.
///
/// Parse failures and range failures share the `InvalidPort` kind and only
/// differ in their message.
pub fn validate_port(raw: &str) -> Result<i64, EnvError> {
    let port = raw.parse::<i64>().map_err(|e| EnvError::InvalidPort {
        detail: format!("unable to parse '{raw}' as integer: {e}"),
    })?;

    if !(MIN_PORT..=MAX_PORT).contains(&port) {
        return Err(EnvError::InvalidPort {
            detail: format!("{port} is out of range ({MIN_PORT}-{MAX_PORT})"),
        });
    }

    Ok(port)
}

/// Validate an absolute URL with a scheme and an authority (`scheme://host`).
///
/// The original string is returned, not the normalized form.
pub fn validate_url(raw: &str) -> Result<String, EnvError> {
    if raw.is_empty() {
        return Err(EnvError::InvalidUrl {
            detail: "empty string".to_string(),
        });
    }

    if raw.trim() != raw {
        return Err(EnvError::InvalidUrl {
            detail: format!("'{raw}' has surrounding whitespace"),
        });
    }

    let url = Url::parse(raw).map_err(|e| EnvError::InvalidUrl {
        detail: format!("unable to parse '{raw}' as URL: {e}"),
    })?;

    let has_authority = raw
        .get(url.scheme().len()..)
        .is_some_and(|rest| rest.starts_with("://"));
    if !has_authority || !url.has_host() {
        return Err(EnvError::InvalidUrl {
            detail: format!("'{raw}' has no host"),
        });
    }

    Ok(raw.to_string())
}

/// Validate a single `local@domain` email address.
pub fn validate_email(raw: &str) -> Result<String, EnvError> {
    if raw.is_empty() {
        return Err(EnvError::InvalidEmail {
            detail: "empty string".to_string(),
        });
    }

    let Some((local, domain)) = raw.rsplit_once('@') else {
        return Err(EnvError::InvalidEmail {
            detail: format!("'{raw}' is missing '@'"),
        });
    };

    if let Err(reason) = check_local_part(local).and_then(|()| check_domain(domain)) {
        return Err(EnvError::InvalidEmail {
            detail: format!("unable to parse '{raw}' as email address: {reason}"),
        });
    }

    Ok(raw.to_string())
}

/// Check that `value` is one of `choices`; empty `choices` accepts anything.
pub fn check_oneof<T: PartialEq + fmt::Display>(value: &T, choices: &[T]) -> Result<(), EnvError> {
    if choices.is_empty() || choices.contains(value) {
        return Ok(());
    }

    Err(EnvError::NotInOneof {
        value: value.to_string(),
        choices: join_choices(choices),
    })
}

pub(crate) fn join_choices<T: fmt::Display>(choices: &[T]) -> String {
    choices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c)
}

fn check_local_part(local: &str) -> Result<(), &'static str> {
    if local.is_empty() {
        return Err("empty local part");
    }
    if local.len() > MAX_EMAIL_LOCAL_LEN {
        return Err("local part too long");
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err("misplaced '.' in local part");
    }
    if !local.chars().all(|c| c == '.' || is_atext(c)) {
        return Err("invalid character in local part");
    }
    Ok(())
}

fn check_domain(domain: &str) -> Result<(), &'static str> {
    if domain.is_empty() {
        return Err("empty domain");
    }
    if domain.len() > MAX_EMAIL_DOMAIN_LEN {
        return Err("domain too long");
    }
    for label in domain.split('.') {
        if label.is_empty() {
            return Err("empty domain label");
        }
        if label.len() > MAX_DOMAIN_LABEL_LEN {
            return Err("domain label too long");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err("misplaced '-' in domain");
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err("invalid character in domain");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // ========================================================================
    // Integers and floats
    // ========================================================================

    #[test]
    fn test_validate_int() {
        assert_eq!(validate_int("42").unwrap(), 42);
        assert_eq!(validate_int("-100").unwrap(), -100);
        assert_eq!(validate_int("0").unwrap(), 0);
    }

    #[test]
    fn test_validate_int_rejects_non_integers() {
        for raw in ["not a number", "2.75", "", " 42", "0x10"] {
            let err = validate_int(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInt, "input: {raw:?}");
        }
    }

    #[test]
    fn test_validate_float() {
        assert_eq!(validate_float("2.75").unwrap(), 2.75);
        assert_eq!(validate_float("42").unwrap(), 42.0);
        assert_eq!(validate_float("-2.5").unwrap(), -2.5);
        assert_eq!(validate_float("0").unwrap(), 0.0);
    }

    #[test]
    fn test_validate_float_rejects_non_numbers() {
        for raw in ["not a number", ""] {
            let err = validate_float(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFloat, "input: {raw:?}");
        }
    }

    #[test]
    fn test_validate_float_rejects_overflow() {
        for raw in ["1e400", "-1e400"] {
            let err = validate_float(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFloat, "input: {raw:?}");
            assert!(err.to_string().contains("out of range"), "got: {err}");
        }
    }

    #[test]
    fn test_validate_float_accepts_explicit_infinity() {
        assert_eq!(validate_float("inf").unwrap(), f64::INFINITY);
        assert_eq!(validate_float("-Infinity").unwrap(), f64::NEG_INFINITY);
    }

    // ========================================================================
    // Booleans
    // ========================================================================

    #[test]
    fn test_validate_boolean_literals() {
        for raw in ["true", "1", "on"] {
            assert!(validate_boolean(raw).unwrap(), "input: {raw:?}");
        }
        for raw in ["false", "0", "off"] {
            assert!(!validate_boolean(raw).unwrap(), "input: {raw:?}");
        }
    }

    #[test]
    fn test_validate_boolean_is_case_sensitive() {
        for raw in ["TRUE", "True", "OFF", "yes", "not a boolean", ""] {
            let err = validate_boolean(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidBool, "input: {raw:?}");
        }
    }

    // ========================================================================
    // Ports
    // ========================================================================

    #[test]
    fn test_validate_port_bounds() {
        assert_eq!(validate_port("1").unwrap(), 1);
        assert_eq!(validate_port("80").unwrap(), 80);
        assert_eq!(validate_port("65535").unwrap(), 65535);
    }

    #[test]
    fn test_validate_port_out_of_range() {
        for raw in ["0", "-1", "65536", "99999"] {
            let err = validate_port(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPort, "input: {raw:?}");
            assert!(err.to_string().contains("out of range"), "got: {err}");
        }
    }

    #[test]
    fn test_validate_port_not_an_integer() {
        for raw in ["not a port", ""] {
            let err = validate_port(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPort, "input: {raw:?}");
            assert!(err.to_string().contains("unable to parse"), "got: {err}");
        }
    }

    // ========================================================================
    // URLs
    // ========================================================================

    #[test]
    fn test_validate_url_accepts_absolute_urls() {
        for raw in [
            "http://example.com",
            "https://example.com/path/to/resource",
            "http://localhost:8080",
            "https://example.com?foo=bar&baz=qux",
            "postgres://user:pass@db:5432/app",
        ] {
            assert_eq!(validate_url(raw).unwrap(), raw);
        }
    }

    #[test]
    fn test_validate_url_rejects_relative_and_hostless() {
        for raw in [
            "",
            "not a url",
            "example.com",
            "/path/only",
            "mailto:user@example.com",
            "http:example.com",
            " http://x.com ",
            "http://x.com\n",
        ] {
            let err = validate_url(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidUrl, "input: {raw:?}");
        }
    }

    // ========================================================================
    // Emails
    // ========================================================================

    #[test]
    fn test_validate_email_accepts_addresses() {
        for raw in [
            "user@example.com",
            "user@mail.example.com",
            "user+tag@example.com",
            "first.last@example.com",
            "ops@localhost",
        ] {
            assert_eq!(validate_email(raw).unwrap(), raw);
        }
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        for raw in [
            "",
            "not an email",
            "userexample.com",
            "user@",
            "@example.com",
            ".user@example.com",
            "us..er@example.com",
            "user@-example.com",
            "user@example..com",
            "a@b@example.com",
            "Jane <jane@example.com>",
        ] {
            let err = validate_email(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidEmail, "input: {raw:?}");
        }
    }

    // ========================================================================
    // Registry dispatch and oneof
    // ========================================================================

    #[test]
    fn test_validate_by_type_name() {
        assert_eq!(validate("string", "hello").unwrap(), Value::from("hello"));
        assert_eq!(validate("str", "hello").unwrap(), Value::from("hello"));
        assert_eq!(validate("", "hello").unwrap(), Value::from("hello"));
        assert_eq!(validate("integer", "42").unwrap(), Value::Int(42));
        assert_eq!(validate("float", "2.75").unwrap(), Value::Float(2.75));
        assert_eq!(validate("bool", "false").unwrap(), Value::Bool(false));
        assert_eq!(
            validate("email", "user@example.com").unwrap(),
            Value::from("user@example.com")
        );
    }

    #[test]
    fn test_validate_unknown_type() {
        let err = validate("unknown", "value").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownType);
    }

    #[test]
    fn test_check_oneof() {
        let choices = [80i64, 443, 8080];
        assert!(check_oneof(&8080, &choices).is_ok());
        assert!(check_oneof(&3000, &[]).is_ok());

        let err = check_oneof(&3000, &choices).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotInOneof);
        assert!(err.to_string().contains("80, 443, 8080"), "got: {err}");
    }
}
