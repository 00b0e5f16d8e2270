//! Template library
//!
//! Named request snapshots, newest first, persisted on every change.

use courier_domain::{RequestSnapshot, RequestTemplate};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{KeyValueStorage, StorageError};
use crate::store::{CollectionStore, TEMPLATES_KEY};

/// Persisted list of request templates.
pub struct TemplateLibrary<S> {
    store: CollectionStore<S>,
    templates: Vec<RequestTemplate>,
}

impl<S: KeyValueStorage> TemplateLibrary<S> {
    /// Loads the stored templates, or starts empty.
    pub fn load(store: CollectionStore<S>) -> Self {
        let templates: Vec<RequestTemplate> = store.load(TEMPLATES_KEY, Vec::new());
        tracing::debug!(count = templates.len(), "templates loaded");
        Self { store, templates }
    }

    /// Returns every template, newest first.
    #[must_use]
    pub fn list(&self) -> &[RequestTemplate] {
        &self.templates
    }

    /// Returns a template by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RequestTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Returns templates whose name or URL contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&RequestTemplate> {
        self.templates.iter().filter(|t| t.matches(query)).collect()
    }

    /// Saves `snapshot` as a new template at the front of the list.
    ///
    /// # Errors
    ///
    /// Returns a domain error for a blank name, or a storage error if the
    /// write fails (the template is kept in memory).
    pub fn save_current(
        &mut self,
        name: &str,
        snapshot: RequestSnapshot,
    ) -> ApplicationResult<RequestTemplate> {
        let template = RequestTemplate::from_snapshot(name, snapshot)?;
        tracing::info!(id = %template.id, name = %template.name, "template saved");
        self.templates.insert(0, template.clone());
        self.persist()?;
        Ok(template)
    }

    /// Overwrites the request fields of template `id`, keeping its name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn update(&mut self, id: &str, snapshot: RequestSnapshot) -> ApplicationResult<()> {
        let slot = self
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApplicationError::NotFound(format!("template {id}")))?;
        *slot = slot.resaved(snapshot);
        self.persist()?;
        Ok(())
    }

    /// Removes template `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn delete(&mut self, id: &str) -> ApplicationResult<RequestTemplate> {
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ApplicationError::NotFound(format!("template {id}")))?;
        let removed = self.templates.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Replaces the whole list and saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn replace_all(&mut self, templates: Vec<RequestTemplate>) -> Result<(), StorageError> {
        self.templates = templates;
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(TEMPLATES_KEY, &self.templates)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::MemoryStorage;
    use courier_domain::{DomainError, Header, Headers, HttpMethod};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn snapshot(url: &str) -> RequestSnapshot {
        RequestSnapshot {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: Headers::from_iter([Header::new("X-Key", "{{KEY}}")]),
            body: Some("{}".to_string()),
        }
    }

    fn library() -> (Arc<MemoryStorage>, TemplateLibrary<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::default());
        let library = TemplateLibrary::load(CollectionStore::shared(Arc::clone(&storage)));
        (storage, library)
    }

    #[test]
    fn test_save_current_inserts_at_front_and_persists() {
        let (storage, mut library) = library();
        library.save_current("First", snapshot("{{BASE_URL}}/a")).unwrap();
        library.save_current("  Second  ", snapshot("{{BASE_URL}}/b")).unwrap();

        let names: Vec<_> = library.list().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);

        let reloaded = TemplateLibrary::load(CollectionStore::shared(storage));
        assert_eq!(reloaded.list(), library.list());
    }

    #[test]
    fn test_blank_name_rejected() {
        let (storage, mut library) = library();
        let error = library.save_current("   ", snapshot("x")).unwrap_err();

        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::EmptyTemplateName)
        ));
        assert!(library.list().is_empty());
        assert_eq!(storage.raw(TEMPLATES_KEY), None);
    }

    #[test]
    fn test_rapid_saves_have_unique_ids() {
        let (_, mut library) = library();
        for i in 0..100 {
            library.save_current(&format!("t{i}"), snapshot("x")).unwrap();
        }
        let ids: HashSet<_> = library.list().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_search_matches_name_or_url() {
        let (_, mut library) = library();
        library.save_current("Login", snapshot("{{BASE_URL}}/auth")).unwrap();
        library.save_current("Users", snapshot("{{BASE_URL}}/users")).unwrap();

        assert_eq!(library.search("login").len(), 1);
        assert_eq!(library.search("USERS").len(), 1);
        assert_eq!(library.search("base_url").len(), 2);
        assert!(library.search("nope").is_empty());
    }

    #[test]
    fn test_update_keeps_id_and_name() {
        let (_, mut library) = library();
        let template = library.save_current("Login", snapshot("old")).unwrap();

        library.update(&template.id, snapshot("new")).unwrap();

        let updated = library.get(&template.id).unwrap();
        assert_eq!(updated.name, "Login");
        assert_eq!(updated.url, "new");
        assert!(matches!(
            library.update("missing", snapshot("x")),
            Err(ApplicationError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete() {
        let (_, mut library) = library();
        let template = library.save_current("Login", snapshot("x")).unwrap();

        let removed = library.delete(&template.id).unwrap();
        assert_eq!(removed.id, template.id);
        assert!(library.list().is_empty());
        assert!(library.delete(&template.id).is_err());
    }

    #[test]
    fn test_storage_failure_is_soft() {
        let mut library = TemplateLibrary::load(CollectionStore::new(MemoryStorage::failing()));
        let error = library.save_current("Login", snapshot("x")).unwrap_err();

        assert!(error.is_soft());
        assert_eq!(library.list().len(), 1);
    }
}
