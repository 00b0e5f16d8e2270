//! Durable key/value storage port

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the write (quota, disabled storage).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed storage of serialized payloads.
///
/// Both calls are synchronous from the caller's point of view. `set` fully
/// replaces whatever was stored under the key.
pub trait KeyValueStorage: Send + Sync {
    /// Reads the payload stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
