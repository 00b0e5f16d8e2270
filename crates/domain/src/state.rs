//! Request execution state for the front end.
//!
//! The session keeps exactly one of these as its "last result" slot: either
//! the response of the most recent send or the error that stopped it.

use serde::{Deserialize, Serialize};

use crate::response::ApiResponse;

/// Represents the outcome slot shown next to the composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    /// Nothing has been sent yet.
    #[default]
    Idle,

    /// A request is in flight. There is no cancel; it ends when the
    /// transport returns.
    Loading,

    /// The exchange completed (any status code).
    Success {
        /// The response data.
        response: Box<ApiResponse>,
    },

    /// The attempt failed before a response could be produced.
    Error {
        /// Error category for display.
        kind: RequestErrorKind,
        /// Human-readable error message.
        message: String,
    },
}

impl RequestState {
    /// Creates a Success state from a response.
    #[must_use]
    pub fn success(response: ApiResponse) -> Self {
        Self::Success {
            response: Box::new(response),
        }
    }

    /// Creates an Error state.
    #[must_use]
    pub fn error(kind: RequestErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    /// Returns true if a request is in progress.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if the last request produced a response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns true if the last request failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns the response if in Success state.
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Success { response } => Some(response),
            _ => None,
        }
    }

    /// Returns the error message if in Error state.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Categories of request errors for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestErrorKind {
    /// The composed body is not valid JSON.
    InvalidBody,

    /// The URL could not be parsed.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// Could not establish or keep the connection.
    ConnectionFailed,

    /// TLS handshake or certificate problem.
    TlsError,

    /// Redirect limit exceeded.
    TooManyRedirects,

    /// The response declared JSON but the body did not parse.
    BodyDecode,

    /// Unknown or unexpected error.
    Unknown,
}

impl RequestErrorKind {
    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidBody => "Invalid JSON in request body",
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::ConnectionFailed => "Connection Failed",
            Self::TlsError => "SSL/TLS Error",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::BodyDecode => "Invalid JSON in response body",
            Self::Unknown => "Unknown Error",
        }
    }

    /// Returns user-facing hints for this error type.
    #[must_use]
    pub const fn suggestions(&self) -> &[&'static str] {
        match self {
            Self::InvalidBody => &[
                "Check that the JSON syntax is valid",
                "Check that substituted variables produce valid JSON",
            ],
            Self::InvalidUrl => &[
                "Check that the URL starts with http:// or https://",
                "Check that every {{variable}} is defined in the active environment",
            ],
            Self::DnsError => &["Check if the hostname is correct"],
            Self::ConnectionRefused | Self::ConnectionFailed => &[
                "Check if the server is running",
                "Verify the port number is correct",
            ],
            Self::TlsError => &["The server's certificate may be invalid or expired"],
            Self::TooManyRedirects => &["The server may have a redirect loop"],
            Self::BodyDecode => &["The server sent a Content-Type of JSON with a non-JSON body"],
            Self::Unknown => &["Check the error message for details"],
        }
    }
}
