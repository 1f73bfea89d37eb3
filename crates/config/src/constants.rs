//! Centralized constants for the envrule crate.
//!
//! This module contains the literals shared between the validators, the rule
//! string parser and the loader to avoid magic value duplication.

// =============================================================================
// Port Bounds
// =============================================================================

/// Lowest port number accepted by the `port` type.
pub const MIN_PORT: i64 = 1;

/// Highest port number accepted by the `port` type.
pub const MAX_PORT: i64 = 65535;

// =============================================================================
// Boolean Literals
// =============================================================================

/// Literals accepted as `true` by the `boolean` type (case-sensitive).
pub const TRUE_LITERALS: &[&str] = &["true", "1", "on"];

/// Literals accepted as `false` by the `boolean` type (case-sensitive).
pub const FALSE_LITERALS: &[&str] = &["false", "0", "off"];

// =============================================================================
// Email Limits
// =============================================================================

/// Maximum length of the local part of an email address, in bytes.
pub const MAX_EMAIL_LOCAL_LEN: usize = 64;

/// Maximum length of the domain of an email address, in bytes.
pub const MAX_EMAIL_DOMAIN_LEN: usize = 253;

/// Maximum length of a single domain label, in bytes.
pub const MAX_DOMAIN_LABEL_LEN: usize = 63;

// =============================================================================
// Rule String Syntax
// =============================================================================

/// Separator between rule tokens.
pub const RULE_TOKEN_SEPARATOR: char = ',';

/// Separator between the choices of a `oneof` token.
pub const RULE_CHOICE_SEPARATOR: char = '|';

/// A rule consisting of only this marker opts the field out of loading.
pub const RULE_SKIP_MARKER: &str = "-";

pub const RULE_KEY_NAME: &str = "name";
pub const RULE_KEY_TYPE: &str = "type";
pub const RULE_KEY_DEFAULT: &str = "default";
pub const RULE_KEY_OPTIONAL: &str = "optional";
pub const RULE_KEY_ONEOF: &str = "oneof";
pub const RULE_KEY_DESC: &str = "desc";

// =============================================================================
// Dotenv
// =============================================================================

/// Environment variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
