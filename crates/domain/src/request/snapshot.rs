//! Request snapshot exchanged between the composer and saved records

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod};

/// The editable fields of a request, unresolved.
///
/// Templates and history entries hand one of these to the composer, which
/// replaces its own fields wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    /// HTTP method
    pub method: HttpMethod,
    /// URL, possibly with placeholders
    pub url: String,
    /// Header rows as entered
    pub headers: Headers,
    /// Raw body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}
