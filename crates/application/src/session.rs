//! Session
//!
//! Ties the composer, the three persisted collections and the dispatcher
//! together for a front end. Every failure of a send ends up in a single
//! [`RequestState`] slot; composer fields are never touched by a send.

use std::sync::Arc;

use courier_domain::{RequestHistoryItem, RequestState, RequestTemplate};

use crate::composer::RequestComposer;
use crate::dispatcher::Dispatcher;
use crate::environments::EnvironmentRegistry;
use crate::error::{ApplicationError, ApplicationResult};
use crate::history::HistoryLedger;
use crate::ports::{Clock, HttpClient, KeyValueStorage};
use crate::store::CollectionStore;
use crate::templates::TemplateLibrary;

/// One user's working state over a storage backend and an HTTP client.
pub struct Session<S, C, K> {
    composer: RequestComposer,
    environments: EnvironmentRegistry<S>,
    templates: TemplateLibrary<S>,
    history: HistoryLedger<S>,
    dispatcher: Dispatcher<C>,
    clock: K,
    state: RequestState,
    storage_warning: Option<String>,
}

impl<S, C, K> Session<S, C, K>
where
    S: KeyValueStorage,
    C: HttpClient,
    K: Clock,
{
    /// Loads every collection from `storage` and starts with a blank request.
    pub fn new(storage: Arc<S>, client: Arc<C>, clock: K) -> Self {
        let store = CollectionStore::shared(storage);
        Self {
            composer: RequestComposer::new(),
            environments: EnvironmentRegistry::load(store.clone()),
            templates: TemplateLibrary::load(store.clone()),
            history: HistoryLedger::load(store),
            dispatcher: Dispatcher::new(client),
            clock,
            state: RequestState::Idle,
            storage_warning: None,
        }
    }

    /// Returns the composer.
    #[must_use]
    pub const fn composer(&self) -> &RequestComposer {
        &self.composer
    }

    /// Returns the composer for editing.
    pub const fn composer_mut(&mut self) -> &mut RequestComposer {
        &mut self.composer
    }

    /// Returns the environment registry.
    #[must_use]
    pub const fn environments(&self) -> &EnvironmentRegistry<S> {
        &self.environments
    }

    /// Returns the environment registry for editing.
    ///
    /// Use [`Session::delete_environment`] to delete, so the active
    /// selection is cleared along with it.
    pub const fn environments_mut(&mut self) -> &mut EnvironmentRegistry<S> {
        &mut self.environments
    }

    /// Returns the template library.
    #[must_use]
    pub const fn templates(&self) -> &TemplateLibrary<S> {
        &self.templates
    }

    /// Returns the template library for editing.
    pub const fn templates_mut(&mut self) -> &mut TemplateLibrary<S> {
        &mut self.templates
    }

    /// Returns the history ledger.
    #[must_use]
    pub const fn history(&self) -> &HistoryLedger<S> {
        &self.history
    }

    /// Returns the history ledger for editing.
    pub const fn history_mut(&mut self) -> &mut HistoryLedger<S> {
        &mut self.history
    }

    /// Returns the outcome of the last send.
    #[must_use]
    pub const fn state(&self) -> &RequestState {
        &self.state
    }

    /// Returns the message of a history write that failed during the last
    /// send, if any.
    #[must_use]
    pub fn storage_warning(&self) -> Option<&str> {
        self.storage_warning.as_deref()
    }

    /// Returns the current time from the session clock.
    #[must_use]
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Selects the environment used for substitution.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no environment has that id.
    pub fn select_environment(&mut self, id: &str) -> ApplicationResult<()> {
        if self.environments.get(id).is_none() {
            return Err(ApplicationError::NotFound(format!("environment {id}")));
        }
        self.composer.select_environment(Some(id.to_string()));
        Ok(())
    }

    /// Deletes environment `id`, clearing the selection if it was active.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn delete_environment(&mut self, id: &str) -> ApplicationResult<()> {
        let result = self.environments.delete(id);
        if !matches!(result, Err(ApplicationError::NotFound(_)))
            && self.composer.active_environment_id() == Some(id)
        {
            self.composer.select_environment(None);
        }
        result.map(|_| ())
    }

    /// Loads template `id` into the composer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn load_template(&mut self, id: &str) -> ApplicationResult<()> {
        let template = self
            .templates
            .get(id)
            .ok_or_else(|| ApplicationError::NotFound(format!("template {id}")))?;
        self.composer.load_snapshot(template.snapshot());
        Ok(())
    }

    /// Saves the composer's request as a new template.
    ///
    /// # Errors
    ///
    /// Returns a domain error for a blank name, or a storage error.
    pub fn save_current_as_template(&mut self, name: &str) -> ApplicationResult<RequestTemplate> {
        self.templates.save_current(name, self.composer.snapshot())
    }

    /// Loads history entry `id` into the composer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn load_history_entry(&mut self, id: &str) -> ApplicationResult<()> {
        let item = self
            .history
            .get(id)
            .ok_or_else(|| ApplicationError::NotFound(format!("history entry {id}")))?;
        let snapshot = self.history.load_entry(item);
        self.composer.load_snapshot(snapshot);
        Ok(())
    }

    /// Resolves, dispatches and records the composed request.
    ///
    /// An invalid body stops before the network and leaves history alone.
    /// Every attempt that reaches the dispatcher is recorded, with no
    /// response when it failed. A failed history write is reported through
    /// [`Session::storage_warning`] and does not change the outcome.
    pub async fn send(&mut self) -> &RequestState {
        self.storage_warning = None;

        let resolved = match self.composer.resolve(self.environments.list()) {
            Ok(resolved) => resolved,
            Err(error) => {
                tracing::warn!(%error, "request not sent");
                self.state = error.to_request_state();
                return &self.state;
            }
        };

        let snapshot = self.composer.snapshot();
        let sent_at = self.clock.now();
        self.state = RequestState::Loading;

        let (entry, state) = match self.dispatcher.dispatch(&resolved).await {
            Ok(response) => (
                RequestHistoryItem::completed(snapshot, response.clone(), sent_at),
                RequestState::success(response),
            ),
            Err(error) => (
                RequestHistoryItem::failed(snapshot, error.elapsed(), sent_at),
                error.to_request_state(),
            ),
        };

        if let Err(error) = self.history.record(entry) {
            self.storage_warning = Some(error.to_string());
        }
        self.state = state;
        &self.state
    }
}
