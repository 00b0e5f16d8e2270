//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A template name is blank.
    #[error("template name must not be empty")]
    EmptyTemplateName,

    /// An environment name is blank.
    #[error("environment name must not be empty")]
    EmptyEnvironmentName,

    /// A positional edit referenced a slot that does not exist.
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of entries present.
        len: usize,
    },

    /// A header line could not be split into a key and a value.
    #[error("invalid header line: {0}")]
    InvalidHeaderLine(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
