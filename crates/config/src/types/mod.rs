//! Value and type model shared by the validators and the loader.

mod value;
mod variable_type;

pub use value::{Value, ValueKind};
pub use variable_type::VariableType;
