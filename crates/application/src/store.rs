//! Persisted collection store
//!
//! Typed load/save of whole collections over a [`KeyValueStorage`]. Every
//! registry goes through here so the parse-or-default rule lives in one place.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ports::{KeyValueStorage, StorageError};

/// Storage key for the environment list.
pub const ENVIRONMENTS_KEY: &str = "api_environments";
/// Storage key for the template list.
pub const TEMPLATES_KEY: &str = "api_templates";
/// Storage key for the history list.
pub const HISTORY_KEY: &str = "api_history";

/// Typed repository over a shared storage backend.
pub struct CollectionStore<S> {
    storage: Arc<S>,
}

impl<S> Clone for CollectionStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: KeyValueStorage> CollectionStore<S> {
    /// Creates a store over `storage`.
    pub fn new(storage: S) -> Self {
        Self::shared(Arc::new(storage))
    }

    /// Creates a store over an already shared backend.
    pub const fn shared(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Loads the value under `key`.
    ///
    /// Falls back to `default` when nothing is stored, the backend cannot be
    /// read, or the payload does not parse. The default is not written back.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let payload = match self.storage.get(key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return default,
            Err(error) => {
                tracing::warn!(key, %error, "storage read failed, using default");
                return default;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key, %error, "stored payload is invalid, using default");
                default
            }
        }
    }

    /// Serializes `value` and replaces whatever is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let payload = serde_json::to_string(value)?;
        self.storage.set(key, &payload).inspect_err(|error| {
            tracing::warn!(key, %error, "storage write failed");
        })?;
        tracing::debug!(key, bytes = payload.len(), "collection saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::MemoryStorage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_missing_returns_default_without_writing() {
        let storage = Arc::new(MemoryStorage::default());
        let store = CollectionStore::shared(Arc::clone(&storage));

        let value: Vec<String> = store.load("k", vec!["fallback".to_string()]);

        assert_eq!(value, vec!["fallback".to_string()]);
        assert_eq!(storage.raw("k"), None);
    }

    #[test]
    fn test_load_corrupt_returns_default_and_keeps_payload() {
        let storage = Arc::new(MemoryStorage::default());
        storage.set("k", "{not json").unwrap();
        let store = CollectionStore::shared(Arc::clone(&storage));

        let value: Vec<u32> = store.load("k", vec![7]);

        assert_eq!(value, vec![7]);
        assert_eq!(storage.raw("k").as_deref(), Some("{not json"));
    }

    #[test]
    fn test_load_wrong_shape_returns_default() {
        let storage = MemoryStorage::default();
        storage.set("k", r#"{"an":"object"}"#).unwrap();
        let store = CollectionStore::new(storage);

        let value: Vec<u32> = store.load("k", Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_replaces_previous_content() {
        let store = CollectionStore::new(MemoryStorage::default());
        store.save("k", &vec![1, 2, 3]).unwrap();
        store.save("k", &vec![4]).unwrap();

        let value: Vec<u32> = store.load("k", Vec::new());
        assert_eq!(value, vec![4]);
    }

    #[test]
    fn test_save_failure_propagates() {
        let store = CollectionStore::new(MemoryStorage::failing());
        let result = store.save("k", &vec![1]);
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
    }
}
