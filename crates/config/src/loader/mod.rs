//! Structure loading from environment variables and `.env` files.
//!
//! Responsibilities:
//! - Parse per-field rule strings into variable descriptors.
//! - Populate `EnvStruct` targets through the `Loader`.
//! - Enforce the `DOTENV_DISABLED` gate before reading `.env` files.
//!
//! Does NOT handle:
//! - Value validation (see `validation.rs` and `types/`).
//! - Writing to the process environment, ever.
//!
//! Invariants / Assumptions:
//! - Empty values are treated as absent everywhere.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod fields;
mod macros;
mod rule;

#[cfg(test)]
mod tests;

pub use builder::{Loader, describe, load, must_load};
pub use env::{DotenvError, Environment, ProcessEnv, lookup};
pub use fields::{EnvStruct, Field, SetValue};
pub use rule::parse_rule;
