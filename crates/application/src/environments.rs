//! Environment registry
//!
//! Named variable sets. Every edit builds a modified copy of the record and
//! swaps it in with [`EnvironmentRegistry::replace`]; records are never
//! patched in place.

use std::collections::HashSet;

use courier_domain::{DomainError, Environment, Variable};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{KeyValueStorage, StorageError};
use crate::store::{CollectionStore, ENVIRONMENTS_KEY};

/// Persisted list of environments.
pub struct EnvironmentRegistry<S> {
    store: CollectionStore<S>,
    environments: Vec<Environment>,
}

impl<S: KeyValueStorage> EnvironmentRegistry<S> {
    /// Loads the stored environments, or the single default one.
    pub fn load(store: CollectionStore<S>) -> Self {
        let environments = store.load(ENVIRONMENTS_KEY, vec![Environment::default_development()]);
        tracing::debug!(count = environments.len(), "environments loaded");
        Self {
            store,
            environments,
        }
    }

    /// Returns every environment in order.
    #[must_use]
    pub fn list(&self) -> &[Environment] {
        &self.environments
    }

    /// Returns an environment by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Environment> {
        self.environments.iter().find(|env| env.id == id)
    }

    /// Creates an empty environment with a fresh id and appends it.
    ///
    /// # Errors
    ///
    /// Returns `EmptyEnvironmentName` for a blank name, or a storage error
    /// if the write fails (the environment is kept).
    pub fn create(&mut self, name: &str) -> ApplicationResult<Environment> {
        let environment = Environment::new(environment_name(name)?);
        self.add(environment.clone())?;
        Ok(environment)
    }

    /// Appends `environment`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the id is taken, or a storage error.
    pub fn add(&mut self, environment: Environment) -> ApplicationResult<()> {
        if self.get(&environment.id).is_some() {
            return Err(ApplicationError::DuplicateId(environment.id));
        }
        tracing::info!(id = %environment.id, name = %environment.name, "environment added");
        self.environments.push(environment);
        self.persist()?;
        Ok(())
    }

    /// Swaps in a whole new version of the environment with the same id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn replace(&mut self, environment: Environment) -> ApplicationResult<()> {
        let slot = self
            .environments
            .iter_mut()
            .find(|env| env.id == environment.id)
            .ok_or_else(|| not_found(&environment.id))?;
        *slot = environment;
        self.persist()?;
        Ok(())
    }

    /// Renames environment `id`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyEnvironmentName` for a blank name, `NotFound` for an
    /// unknown id, or a storage error.
    pub fn rename(&mut self, id: &str, name: &str) -> ApplicationResult<()> {
        let name = environment_name(name)?;
        let renamed = self.require(id)?.renamed(name);
        self.replace(renamed)
    }

    /// Appends a blank variable row to environment `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn add_variable(&mut self, id: &str) -> ApplicationResult<()> {
        let edited = self.require(id)?.clone().with_variable("", "");
        self.replace(edited)
    }

    /// Replaces the variable at `index` in environment `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a domain error for a bad index, or a storage error.
    pub fn update_variable(
        &mut self,
        id: &str,
        index: usize,
        variable: Variable,
    ) -> ApplicationResult<()> {
        let edited = self.require(id)?.with_variable_at(index, variable)?;
        self.replace(edited)
    }

    /// Removes the variable at `index` from environment `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, a domain error for a bad index, or a storage error.
    pub fn remove_variable(&mut self, id: &str, index: usize) -> ApplicationResult<()> {
        let edited = self.require(id)?.without_variable_at(index)?;
        self.replace(edited)
    }

    /// Sets `key` to `value`, updating the first variable with that key or
    /// appending a new one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn set_variable(&mut self, id: &str, key: &str, value: &str) -> ApplicationResult<()> {
        let environment = self.require(id)?;
        let variable = Variable::new(key, value);
        let edited = match environment.variables.iter().position(|v| v.key == key) {
            Some(index) => environment.with_variable_at(index, variable)?,
            None => environment.clone().with_variable(key, value),
        };
        self.replace(edited)
    }

    /// Removes the first variable named `key`.
    ///
    /// Returns false if no variable has that key.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn unset_variable(&mut self, id: &str, key: &str) -> ApplicationResult<bool> {
        let Some(index) = self.require(id)?.variables.iter().position(|v| v.key == key) else {
            return Ok(false);
        };
        self.remove_variable(id, index)?;
        Ok(true)
    }

    /// Removes environment `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or a storage error.
    pub fn delete(&mut self, id: &str) -> ApplicationResult<Environment> {
        let index = self
            .environments
            .iter()
            .position(|env| env.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = self.environments.remove(index);
        tracing::info!(id, "environment deleted");
        self.persist()?;
        Ok(removed)
    }

    /// Replaces the whole list and saves.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` without changing anything if two environments
    /// share an id, or a storage error.
    pub fn replace_all(&mut self, environments: Vec<Environment>) -> ApplicationResult<()> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = environments.iter().find(|env| !seen.insert(env.id.as_str())) {
            return Err(ApplicationError::DuplicateId(duplicate.id.clone()));
        }
        self.environments = environments;
        self.persist()?;
        Ok(())
    }

    /// Returns `{name, variables}` of environment `id` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn export(&self, id: &str) -> ApplicationResult<String> {
        Ok(self.require(id)?.to_export_json()?)
    }

    fn require(&self, id: &str) -> ApplicationResult<&Environment> {
        self.get(id).ok_or_else(|| not_found(id))
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save(ENVIRONMENTS_KEY, &self.environments)
    }
}

fn environment_name(name: &str) -> Result<&str, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::EmptyEnvironmentName);
    }
    Ok(name)
}

fn not_found(id: &str) -> ApplicationError {
    ApplicationError::NotFound(format!("environment {id}"))
}
