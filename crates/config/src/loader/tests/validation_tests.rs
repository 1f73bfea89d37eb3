//! Error reporting tests for struct loads.
//!
//! Responsibilities:
//! - Test that malformed rules fail with `InvalidTag` naming the field.
//! - Test `SetField` and `UnsupportedType` reporting.
//! - Test that validation errors keep their kind and variable name.
//! - Test `must_load` panics with the error as payload.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::error::{EnvError, ErrorKind};
use crate::loader::{EnvStruct, Field, Loader};

crate::env_struct! {
    #[derive(Debug, Default)]
    struct UnknownType {
        id: String = "name=ID, type=uuid",
    }
}

crate::env_struct! {
    #[derive(Debug, Default)]
    struct MisspelledKey {
        id: String = "name=ID, defualt=1",
    }
}

crate::env_struct! {
    #[derive(Debug, Default)]
    struct Mismatched {
        count: String = "name=COUNT, type=int",
    }
}

crate::env_struct! {
    #[derive(Debug, Default)]
    struct Narrow {
        level: u8 = "name=LEVEL, type=int",
    }
}

crate::env_struct! {
    #[derive(Debug, Default)]
    struct Typed {
        endpoint: String = "name=ENDPOINT, type=url",
        contact: String = "name=CONTACT, type=email",
        verbose: bool = "name=VERBOSE, type=bool",
        ratio: f64 = "name=RATIO, type=float",
    }
}

#[derive(Debug, Default)]
struct Opaque;

impl EnvStruct for Opaque {
    fn fields(&mut self) -> Result<Vec<Field<'_>>, String> {
        Err("not a structure".to_string())
    }
}

fn load_err<T: EnvStruct + std::fmt::Debug>(pairs: &[(&str, &str)]) -> EnvError {
    let env: HashMap<&str, &str> = pairs.iter().copied().collect();
    Loader::with_env(&env).load::<T>().unwrap_err()
}

#[test]
fn test_unknown_type_is_invalid_tag() {
    let err = load_err::<UnknownType>(&[("ID", "abc")]);
    assert_eq!(err.kind(), ErrorKind::InvalidTag);
    assert!(err.is(ErrorKind::UnknownType));
    assert!(err.to_string().contains("'id'"), "got: {err}");
}

#[test]
fn test_unrecognized_rule_key_is_invalid_tag() {
    let err = load_err::<MisspelledKey>(&[("ID", "abc")]);
    assert_eq!(err.kind(), ErrorKind::InvalidTag);
    assert!(err.to_string().contains("defualt"), "got: {err}");
}

#[test]
fn test_field_type_mismatch_is_set_field() {
    let err = load_err::<Mismatched>(&[("COUNT", "12")]);
    assert_eq!(err.kind(), ErrorKind::SetField);
    assert!(err.to_string().contains("'count'"), "got: {err}");

    let err = load_err::<Narrow>(&[("LEVEL", "300")]);
    assert_eq!(err.kind(), ErrorKind::SetField);
    assert!(err.to_string().contains("u8"), "got: {err}");
}

#[test]
fn test_unsupported_target() {
    let err = load_err::<Opaque>(&[]);
    assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    assert!(err.to_string().contains("Opaque"), "got: {err}");
}

#[test]
fn test_validation_errors_name_the_variable() {
    let valid = [
        ("ENDPOINT", "https://example.com"),
        ("CONTACT", "ops@example.com"),
        ("VERBOSE", "true"),
        ("RATIO", "0.75"),
    ];

    let cases = [
        ("ENDPOINT", "not a url", ErrorKind::InvalidUrl),
        ("CONTACT", "ops.example.com", ErrorKind::InvalidEmail),
        ("VERBOSE", "yes", ErrorKind::InvalidBool),
        ("RATIO", "three", ErrorKind::InvalidFloat),
    ];

    for (key, bad, kind) in cases {
        let pairs: Vec<(&str, &str)> = valid
            .iter()
            .map(|&(k, v)| if k == key { (k, bad) } else { (k, v) })
            .collect();
        let err = load_err::<Typed>(&pairs);
        assert_eq!(err.kind(), kind, "{key}={bad}");
        assert_eq!(err.variable_name(), Some(key));
    }
}

#[test]
fn test_must_load_panics_with_error_payload() {
    let env: HashMap<&str, &str> = HashMap::new();
    let loader = Loader::with_env(&env);

    let payload = catch_unwind(AssertUnwindSafe(|| loader.must_load::<Typed>())).unwrap_err();
    let err = payload
        .downcast::<EnvError>()
        .expect("payload should be the EnvError");
    assert_eq!(err.kind(), ErrorKind::MissingValue);
    assert_eq!(err.variable_name(), Some("ENDPOINT"));
}

#[test]
fn test_must_load_returns_value_on_success() {
    let env = HashMap::from([
        ("ENDPOINT", "https://example.com"),
        ("CONTACT", "ops@example.com"),
        ("VERBOSE", "0"),
        ("RATIO", "1"),
    ]);
    let typed = Loader::with_env(&env).must_load::<Typed>();
    assert_eq!(typed.contact, "ops@example.com");
    assert!(!typed.verbose);
    assert_eq!(typed.ratio, 1.0);
}
