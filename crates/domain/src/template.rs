//! Saved request templates

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::{Headers, HttpMethod, RequestSnapshot};

/// A named snapshot of a composed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// URL, possibly with placeholders
    pub url: String,
    /// Header rows
    #[serde(default)]
    pub headers: Headers,
    /// Raw body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RequestTemplate {
    /// Creates a template from the composer's current state.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTemplateName` if `name` is blank.
    pub fn from_snapshot(name: &str, snapshot: RequestSnapshot) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyTemplateName);
        }
        Ok(Self {
            id: crate::generate_id(),
            name: name.to_string(),
            method: snapshot.method,
            url: snapshot.url,
            headers: snapshot.headers,
            body: snapshot.body,
        })
    }

    /// Returns a copy whose request fields come from `snapshot`; id and name are kept.
    #[must_use]
    pub fn resaved(&self, snapshot: RequestSnapshot) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            method: snapshot.method,
            url: snapshot.url,
            headers: snapshot.headers,
            body: snapshot.body,
        }
    }

    /// Returns the fields needed to repopulate the composer.
    #[must_use]
    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }

    /// Case-insensitive substring match on name or URL.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.url.to_lowercase().contains(&query)
    }
}
