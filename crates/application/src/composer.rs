//! Request composer
//!
//! Holds the request being edited and turns it into a [`ResolvedRequest`]
//! against the active environment. All edits go through explicit transition
//! methods; the composer never touches saved templates or history.

use courier_domain::environment::DEFAULT_ENVIRONMENT_ID;
use courier_domain::{
    DomainResult, Environment, Header, Headers, HttpMethod, RequestErrorKind, RequestSnapshot,
    RequestState, ResolvedRequest, Variable,
};
use indexmap::IndexMap;
use thiserror::Error;

use crate::variable_resolver::{interpolate, unresolved_names};

const ACCEPT: &str = "Accept";
const CONTENT_TYPE: &str = "Content-Type";

/// Errors raised while resolving the composed request.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The body, after substitution, is not valid JSON.
    #[error("Invalid JSON in request body: {0}")]
    InvalidRequestBody(#[source] serde_json::Error),
}

impl ComposeError {
    /// Converts this error to a `RequestState::Error` for display.
    #[must_use]
    pub fn to_request_state(&self) -> RequestState {
        match self {
            Self::InvalidRequestBody(source) => {
                RequestState::error(RequestErrorKind::InvalidBody, source.to_string())
            }
        }
    }
}

/// The in-progress request and the active environment selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestComposer {
    method: HttpMethod,
    url: String,
    headers: Headers,
    body: String,
    active_environment_id: Option<String>,
}

impl Default for RequestComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestComposer {
    /// Creates a blank GET request with one empty header row, bound to the
    /// default environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            method: HttpMethod::Get,
            url: String::new(),
            headers: Headers::with_blank_row(),
            body: String::new(),
            active_environment_id: Some(DEFAULT_ENVIRONMENT_ID.to_string()),
        }
    }

    /// Returns the selected method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the URL as entered.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the header rows, blank ones included.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the body text as entered.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the active environment id, if any.
    #[must_use]
    pub fn active_environment_id(&self) -> Option<&str> {
        self.active_environment_id.as_deref()
    }

    /// Sets the method.
    pub fn set_method(&mut self, method: HttpMethod) {
        self.method = method;
    }

    /// Sets the URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Replaces every header row.
    pub fn set_headers(&mut self, headers: Headers) {
        self.headers = headers;
    }

    /// Appends a blank header row.
    pub fn add_header(&mut self) {
        self.headers.add_blank();
    }

    /// Replaces the header row at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no row at `index`.
    pub fn update_header(&mut self, index: usize, header: Header) -> DomainResult<()> {
        self.headers.update(index, header)
    }

    /// Removes the header row at `index`. The list may become empty.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no row at `index`.
    pub fn remove_header(&mut self, index: usize) -> DomainResult<Header> {
        self.headers.remove(index)
    }

    /// Sets the body text.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Selects the environment used for substitution. `None` disables it.
    pub fn select_environment(&mut self, id: Option<String>) {
        self.active_environment_id = id;
    }

    /// Pretty-prints the body if it parses as JSON.
    ///
    /// Returns false and leaves the body alone otherwise.
    pub fn format_body(&mut self) -> bool {
        match format_json(&self.body) {
            Some(formatted) => {
                self.body = formatted;
                true
            }
            None => false,
        }
    }

    /// Replaces every editable field with the snapshot's values.
    pub fn load_snapshot(&mut self, snapshot: RequestSnapshot) {
        self.method = snapshot.method;
        self.url = snapshot.url;
        self.headers = snapshot.headers;
        self.body = snapshot.body.unwrap_or_default();
    }

    /// Captures the editable fields, unresolved.
    #[must_use]
    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: (!self.body.is_empty()).then(|| self.body.clone()),
        }
    }

    /// Substitutes variables and validates the body.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequestBody` if a body-carrying request has a body
    /// that is not JSON after substitution.
    pub fn resolve(&self, environments: &[Environment]) -> Result<ResolvedRequest, ComposeError> {
        let variables = self.active_variables(environments);

        let mut headers = IndexMap::new();
        headers.insert(ACCEPT.to_string(), mime::APPLICATION_JSON.to_string());
        headers.insert(CONTENT_TYPE.to_string(), mime::APPLICATION_JSON.to_string());
        for header in self.headers.sendable() {
            headers.insert(
                interpolate(&header.key, variables),
                interpolate(&header.value, variables),
            );
        }

        let url = interpolate(&self.url, variables);
        let missing = unresolved_names(&url);
        if !missing.is_empty() {
            tracing::debug!(?missing, "URL still contains placeholders");
        }

        let body = if self.method.has_body() && !self.body.is_empty() {
            let text = interpolate(&self.body, variables);
            let value: serde_json::Value =
                serde_json::from_str(&text).map_err(ComposeError::InvalidRequestBody)?;
            Some(value.to_string())
        } else {
            None
        };

        Ok(ResolvedRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }

    fn active_variables<'a>(&self, environments: &'a [Environment]) -> &'a [Variable] {
        self.active_environment_id
            .as_deref()
            .and_then(|id| environments.iter().find(|env| env.id == id))
            .map_or(&[], |env| env.variables.as_slice())
    }
}

/// Pretty-prints `text` as JSON, or returns `None` if it does not parse.
#[must_use]
pub fn format_json(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    serde_json::to_string_pretty(&value).ok()
}
