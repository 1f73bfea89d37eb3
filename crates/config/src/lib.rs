//! Declarative, validated configuration from environment variables.
//!
//! This crate provides typed variable descriptors with defaults, optional
//! values, allowed-value sets and custom validators, plus a loader that
//! populates whole structures from per-field rule strings.
//!
//! ```
//! use std::collections::HashMap;
//!
//! envrule::env_struct! {
//!     #[derive(Debug, Default)]
//!     struct Config {
//!         port: u16 = "name=PORT, type=port, default=3000",
//!         env: String = "name=APP_ENV, oneof=dev|prod, default=dev",
//!     }
//! }
//!
//! let env = HashMap::from([("APP_ENV", "prod")]);
//! let config: Config = envrule::Loader::with_env(env).load().unwrap();
//! assert_eq!(config.port, 3000);
//! assert_eq!(config.env, "prod");
//! ```

pub mod constants;
pub mod error;
mod loader;
pub mod types;
pub mod validation;
mod variable;

pub use error::{BoxError, EnvError, ErrorKind};
pub use loader::{
    DotenvError, EnvStruct, Environment, Field, Loader, ProcessEnv, SetValue, describe, load,
    lookup, must_load, parse_rule,
};
pub use types::{Value, ValueKind, VariableType};
pub use validation::{check_oneof, validate};
pub use variable::{
    EnvValue, Validator, Variable, boolean, email, float, int, port, string, url,
};
