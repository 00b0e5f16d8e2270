//! HTTP client port

use std::future::Future;

use courier_domain::{RequestErrorKind, ResolvedRequest};
use indexmap::IndexMap;
use thiserror::Error;

/// Transport-level failures. None of these carry a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name did not resolve.
    #[error("Could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve
        host: String,
        /// Underlying message
        message: String,
    },

    /// Nothing was listening on the target port.
    #[error("Connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// The connection could not be established or was dropped.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS negotiation failed.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// The redirect limit was exceeded.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Configured limit
        max: usize,
    },

    /// A header name or value could not be encoded.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Maps this error to a display category.
    #[must_use]
    pub const fn to_error_kind(&self) -> RequestErrorKind {
        match self {
            Self::InvalidUrl(_) => RequestErrorKind::InvalidUrl,
            Self::DnsError { .. } => RequestErrorKind::DnsError,
            Self::ConnectionRefused { .. } => RequestErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => RequestErrorKind::ConnectionFailed,
            Self::TlsError(_) => RequestErrorKind::TlsError,
            Self::TooManyRedirects { .. } => RequestErrorKind::TooManyRedirects,
            Self::InvalidHeader(_) | Self::Other(_) => RequestErrorKind::Unknown,
        }
    }
}

/// A completed HTTP exchange with the body fully read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// Status code
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Headers with lower-cased names, in wire order
    pub headers: IndexMap<String, String>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns the declared content type, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }
}

/// Port for executing HTTP requests.
///
/// Implementations send exactly once: no retries, no client-side timeout,
/// and cookies/credentials are always forwarded.
pub trait HttpClient: Send + Sync {
    /// Sends the request and reads the whole response body.
    ///
    /// # Errors
    ///
    /// Returns an error if no HTTP response could be obtained. Non-2xx
    /// status codes are not errors.
    fn send(
        &self,
        request: &ResolvedRequest,
    ) -> impl Future<Output = Result<TransportResponse, HttpClientError>> + Send;
}
