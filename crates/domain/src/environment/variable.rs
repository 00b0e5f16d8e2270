//! Environment variable types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Id of the environment shipped on first start.
pub const DEFAULT_ENVIRONMENT_ID: &str = "default";

/// A single `key = value` pair usable as `{{key}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// The placeholder name, without braces.
    pub key: String,
    /// The substituted text.
    pub value: String,
}

impl Variable {
    /// Creates a new variable.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A named, ordered set of variables.
///
/// Variable order matters: interpolation applies them sequentially. Edits
/// go through the `with_*` builders, which return a modified copy so the
/// registry can swap the whole record in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Environment name (e.g., "Development", "Production")
    pub name: String,
    /// Variables in application order
    #[serde(default)]
    pub variables: Vec<Variable>,
}

/// Shape used when copying an environment to the clipboard.
#[derive(Serialize)]
struct ExportedEnvironment<'a> {
    name: &'a str,
    variables: &'a [Variable],
}

impl Environment {
    /// Creates a new, empty environment with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(crate::generate_id(), name)
    }

    /// Creates an empty environment with an explicit id.
    #[must_use]
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// The environment present before the user creates any.
    #[must_use]
    pub fn default_development() -> Self {
        Self::with_id(DEFAULT_ENVIRONMENT_ID, "Default")
            .with_variable("BASE_URL", "http://localhost:3001")
    }

    /// Returns a copy with a variable appended.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push(Variable::new(key, value));
        self
    }

    /// Returns a copy with a different name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with the variable at `index` replaced.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no variable at `index`.
    pub fn with_variable_at(&self, index: usize, variable: Variable) -> DomainResult<Self> {
        let mut copy = self.clone();
        let len = copy.variables.len();
        let slot = copy
            .variables
            .get_mut(index)
            .ok_or(DomainError::IndexOutOfRange { index, len })?;
        *slot = variable;
        Ok(copy)
    }

    /// Returns a copy without the variable at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no variable at `index`.
    pub fn without_variable_at(&self, index: usize) -> DomainResult<Self> {
        if index >= self.variables.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.variables.len(),
            });
        }
        let mut copy = self.clone();
        copy.variables.remove(index);
        Ok(copy)
    }

    /// Returns the value of the first variable named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.key == key)
            .map(|v| v.value.as_str())
    }

    /// Serializes `{name, variables}` as pretty JSON for sharing.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ExportedEnvironment {
            name: &self.name,
            variables: &self.variables,
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new("New Environment")
    }
}
