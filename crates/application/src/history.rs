//! History ledger
//!
//! Newest-first log of sent requests, capped at
//! [`MAX_HISTORY_ENTRIES`](courier_domain::MAX_HISTORY_ENTRIES) and written
//! through to storage on every change.

use courier_domain::{HistoryFilter, HttpMethod, RequestHistory, RequestHistoryItem, RequestSnapshot};

use crate::ports::{KeyValueStorage, StorageError};
use crate::store::{CollectionStore, HISTORY_KEY};

/// Persisted request history.
pub struct HistoryLedger<S> {
    store: CollectionStore<S>,
    history: RequestHistory,
}

impl<S: KeyValueStorage> HistoryLedger<S> {
    /// Loads the stored history, or starts empty.
    pub fn load(store: CollectionStore<S>) -> Self {
        let entries: Vec<RequestHistoryItem> = store.load(HISTORY_KEY, Vec::new());
        tracing::debug!(count = entries.len(), "history loaded");
        Self {
            store,
            history: RequestHistory::from_entries(entries),
        }
    }

    /// Returns the underlying history.
    #[must_use]
    pub const fn history(&self) -> &RequestHistory {
        &self.history
    }

    /// Returns every entry, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &RequestHistoryItem> {
        self.history.entries().iter()
    }

    /// Returns an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RequestHistoryItem> {
        self.history.get(id)
    }

    /// Returns the entries matching `filter`, newest first.
    #[must_use]
    pub fn filter(&self, filter: &HistoryFilter) -> Vec<&RequestHistoryItem> {
        self.history
            .entries()
            .iter()
            .filter(|e| filter.matches(e))
            .collect()
    }

    /// Returns the distinct methods present.
    #[must_use]
    pub fn methods(&self) -> Vec<HttpMethod> {
        self.history.methods()
    }

    /// Prepends `entry`, evicts past the cap, and saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the entry stays in memory.
    pub fn record(&mut self, entry: RequestHistoryItem) -> Result<(), StorageError> {
        tracing::debug!(id = %entry.id, url = %entry.url, "recording history entry");
        self.history.add(entry);
        self.persist()
    }

    /// Removes every entry and saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; memory is cleared regardless.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.history.clear();
        self.persist()
    }

    /// Replaces the whole history and saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn replace_all(&mut self, entries: Vec<RequestHistoryItem>) -> Result<(), StorageError> {
        self.history = RequestHistory::from_entries(entries);
        self.persist()
    }

    /// Returns the request fields of `item` for the composer.
    #[must_use]
    pub fn load_entry(&self, item: &RequestHistoryItem) -> RequestSnapshot {
        item.snapshot()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(HISTORY_KEY, &self.history)
    }
}
