//! Stable JSON output for files and terminal display.
//!
//! - 2-space indentation
//! - Trailing newline
//! - Key order as declared (struct fields and `IndexMap` insertion order)

mod json;

pub use json::{SerializationError, from_json, to_json_stable};
