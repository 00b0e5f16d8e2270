//! Application error types

use thiserror::Error;
use courier_domain::DomainError;

use crate::composer::ComposeError;
use crate::dispatcher::DispatchError;
use crate::ports::StorageError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// The request could not be resolved.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The request could not be dispatched.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A durable write failed. The in-memory change was kept.
    #[error("changes were not saved: {0}")]
    Storage(#[from] StorageError),

    /// A record could not be serialized for export.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A record with the same id already exists.
    #[error("duplicate id: {0}")]
    DuplicateId(String),
}

impl ApplicationError {
    /// Returns true for failures that leave the session usable with its
    /// in-memory state already updated.
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
