//! Declarative rule string parsing.
//!
//! A rule is a comma-separated list of `key[=value]` tokens:
//!
//! ```text
//! name=APP_ENV, type=string, default=dev, oneof=dev|staging|prod, desc=Deployment
//! ```
//!
//! Invariants:
//! - Tokens and choices are trimmed; empty tokens are ignored.
//! - Unknown keys, duplicate keys, and `optional=...` are rejected.
//! - `default` and `oneof` literals are parsed with the declared type here,
//!   so a bad literal fails the rule rather than a later load.
//! - A rule of `-`, or one without `name`, yields a descriptor with an empty
//!   name, which the loader skips.
//!
//! Limitations:
//! - Values cannot contain `,` (or `|` inside `oneof`); there is no escaping.
//!   A `desc` such as `desc=Bind address, usually 0.0.0.0` fails with
//!   `InvalidTag` because `usually 0.0.0.0` is read as a separate token.

use crate::constants::{
    RULE_CHOICE_SEPARATOR, RULE_KEY_DEFAULT, RULE_KEY_DESC, RULE_KEY_NAME, RULE_KEY_ONEOF,
    RULE_KEY_OPTIONAL, RULE_KEY_TYPE, RULE_SKIP_MARKER, RULE_TOKEN_SEPARATOR,
};
use crate::error::EnvError;
use crate::types::{Value, VariableType};
use crate::variable::Variable;

#[derive(Default)]
struct RuleTokens<'a> {
    name: Option<&'a str>,
    ty: Option<&'a str>,
    default: Option<&'a str>,
    optional: bool,
    oneof: Option<&'a str>,
    desc: Option<&'a str>,
}

/// Parse the rule attached to `field` into an untyped variable descriptor.
pub fn parse_rule(field: &str, rule: &str) -> Result<Variable<Value>, EnvError> {
    let rule = rule.trim();
    if rule.is_empty() || rule == RULE_SKIP_MARKER {
        return Ok(Variable::new("", VariableType::String));
    }

    let tokens = tokenize(field, rule)?;

    let type_name = tokens.ty.unwrap_or_default();
    let ty = VariableType::from_name(type_name).map_err(|e| {
        EnvError::invalid_tag_caused_by(field, format!("unknown type '{type_name}'"), e)
    })?;

    let mut variable = Variable::new(tokens.name.unwrap_or_default(), ty);

    if let Some(literal) = tokens.default {
        let value = ty.validate(literal).map_err(|e| {
            EnvError::invalid_tag_caused_by(field, format!("invalid default '{literal}'"), e)
        })?;
        variable = variable.default(value);
    }

    if tokens.optional {
        variable = variable.optional();
    }

    if let Some(list) = tokens.oneof {
        variable = variable.oneof(parse_choices(field, ty, list)?);
    }

    if let Some(desc) = tokens.desc {
        variable = variable.desc(desc);
    }

    Ok(variable)
}

fn tokenize<'a>(field: &str, rule: &'a str) -> Result<RuleTokens<'a>, EnvError> {
    let mut tokens = RuleTokens::default();

    for token in rule.split(RULE_TOKEN_SEPARATOR).map(str::trim) {
        if token.is_empty() {
            continue;
        }

        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (token, None),
        };

        let slot = match key {
            RULE_KEY_OPTIONAL => {
                if value.is_some() {
                    return Err(EnvError::invalid_tag(
                        field,
                        format!("'{RULE_KEY_OPTIONAL}' does not take a value"),
                    ));
                }
                if tokens.optional {
                    return Err(duplicate(field, key));
                }
                tokens.optional = true;
                continue;
            }
            RULE_KEY_NAME => &mut tokens.name,
            RULE_KEY_TYPE => &mut tokens.ty,
            RULE_KEY_DEFAULT => &mut tokens.default,
            RULE_KEY_ONEOF => &mut tokens.oneof,
            RULE_KEY_DESC => &mut tokens.desc,
            _ => {
                return Err(EnvError::invalid_tag(
                    field,
                    format!("unrecognized token '{token}'"),
                ));
            }
        };

        let Some(value) = value else {
            return Err(EnvError::invalid_tag(
                field,
                format!("'{key}' requires a value"),
            ));
        };
        if slot.is_some() {
            return Err(duplicate(field, key));
        }
        *slot = Some(value);
    }

    Ok(tokens)
}

fn parse_choices(field: &str, ty: VariableType, list: &str) -> Result<Vec<Value>, EnvError> {
    let choices: Vec<&str> = list
        .split(RULE_CHOICE_SEPARATOR)
        .map(str::trim)
        .filter(|choice| !choice.is_empty())
        .collect();

    if choices.is_empty() {
        return Err(EnvError::invalid_tag(
            field,
            format!("'{RULE_KEY_ONEOF}' requires at least one choice"),
        ));
    }

    choices
        .into_iter()
        .map(|choice| {
            ty.validate(choice).map_err(|e| {
                EnvError::invalid_tag_caused_by(field, format!("invalid choice '{choice}'"), e)
            })
        })
        .collect()
}

fn duplicate(field: &str, key: &str) -> EnvError {
    EnvError::invalid_tag(field, format!("duplicate '{key}'"))
}
