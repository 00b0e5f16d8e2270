//! HTTP header types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A single user-entered header row.
///
/// Either side may be empty while the user is still typing; such rows are
/// kept in the composer but never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The header name (e.g., "Authorization")
    pub key: String,
    /// The header value, possibly containing `{{placeholders}}`
    pub value: String,
}

impl Header {
    /// Creates a new header row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns true if both key and value are non-blank.
    #[must_use]
    pub fn is_sendable(&self) -> bool {
        !self.key.trim().is_empty() && !self.value.trim().is_empty()
    }
}

impl FromStr for Header {
    type Err = DomainError;

    /// Parses a `Key: value` line.
    fn from_str(line: &str) -> DomainResult<Self> {
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| DomainError::InvalidHeaderLine(line.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::InvalidHeaderLine(line.to_string()));
        }
        Ok(Self::new(key, value.trim()))
    }
}

/// An ordered list of header rows. Duplicate keys are permitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty header list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates a list holding one blank row, the composer's initial state.
    #[must_use]
    pub fn with_blank_row() -> Self {
        Self {
            items: vec![Header::default()],
        }
    }

    /// Appends a header row.
    pub fn add(&mut self, header: Header) {
        self.items.push(header);
    }

    /// Appends a blank row for the user to fill in.
    pub fn add_blank(&mut self) {
        self.items.push(Header::default());
    }

    /// Replaces the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no row at `index`.
    pub fn update(&mut self, index: usize, header: Header) -> DomainResult<()> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(DomainError::IndexOutOfRange { index, len })?;
        *slot = header;
        Ok(())
    }

    /// Removes the row at `index`. Removing the last row leaves the list empty.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if there is no row at `index`.
    pub fn remove(&mut self, index: usize) -> DomainResult<Header> {
        if index >= self.items.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Returns rows whose key and value are both non-blank, in order.
    pub fn sendable(&self) -> impl Iterator<Item = &Header> {
        self.items.iter().filter(|h| h.is_sendable())
    }

    /// Returns all rows, including blank ones.
    #[must_use]
    pub fn all(&self) -> &[Header] {
        &self.items
    }

    /// Returns the number of rows.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
