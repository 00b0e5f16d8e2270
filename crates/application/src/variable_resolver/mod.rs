//! Variable substitution for `{{key}}` placeholders.
//!
//! # Usage
//!
//! ```
//! use courier_application::variable_resolver::interpolate;
//! use courier_domain::Variable;
//!
//! let vars = [Variable::new("BASE_URL", "http://localhost:3001")];
//! assert_eq!(interpolate("{{BASE_URL}}/users", &vars), "http://localhost:3001/users");
//! ```

pub mod engine;
pub mod parser;

pub use engine::interpolate;
pub use parser::{Placeholder, has_placeholders, parse_placeholders, unresolved_names};
