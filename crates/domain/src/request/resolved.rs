//! Dispatch-ready request descriptor

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

use super::HttpMethod;

/// A request with every placeholder substituted and the body validated.
///
/// Produced by the composer and consumed by the dispatcher. Header names are
/// kept exactly as the user typed them; insertion order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Fully interpolated URL
    pub url: String,
    /// Transport header map (defaults first, user headers override)
    pub headers: IndexMap<String, String>,
    /// Canonical JSON text of the body, if one is sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ResolvedRequest {
    /// Validates the URL and returns the parsed version if valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn parse_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }

    /// Returns true if the URL still contains `{{...}}` after interpolation.
    #[must_use]
    pub fn has_placeholders(&self) -> bool {
        self.url
            .find("{{")
            .is_some_and(|start| self.url[start..].contains("}}"))
    }

    /// Returns the value sent for `name` (exact, case-sensitive match).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
