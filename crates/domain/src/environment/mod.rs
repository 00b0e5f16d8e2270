//! Environment and variable domain types

mod variable;

pub use variable::{DEFAULT_ENVIRONMENT_ID, Environment, Variable};
