//! Request history domain model
//!
//! Defines the structure for tracking executed requests.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::{Headers, HttpMethod, RequestSnapshot};
use crate::response::{ApiResponse, StatusClass, format_duration, spec::duration_millis};

/// Maximum number of entries the history keeps.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// A single entry in the request history.
///
/// The request fields are stored as the user entered them, before
/// interpolation, so replaying an entry re-resolves against the
/// environment active at that time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestHistoryItem {
    /// Unique identifier for this entry.
    pub id: String,
    /// When the request was sent, epoch milliseconds.
    pub timestamp: i64,
    /// HTTP method used.
    pub method: HttpMethod,
    /// The request URL as entered.
    pub url: String,
    /// Request header rows as entered.
    #[serde(default)]
    pub headers: Headers,
    /// Request body as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Response, absent when the exchange failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ApiResponse>,
    /// Time spent on the attempt.
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl RequestHistoryItem {
    /// Creates an entry for a completed exchange.
    #[must_use]
    pub fn completed(request: RequestSnapshot, response: ApiResponse, sent_at: DateTime<Utc>) -> Self {
        let duration = response.duration;
        Self::build(request, Some(response), duration, sent_at)
    }

    /// Creates an entry for an attempt that produced no response.
    #[must_use]
    pub fn failed(request: RequestSnapshot, duration: Duration, sent_at: DateTime<Utc>) -> Self {
        Self::build(request, None, duration, sent_at)
    }

    fn build(
        request: RequestSnapshot,
        response: Option<ApiResponse>,
        duration: Duration,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: crate::generate_id(),
            timestamp: sent_at.timestamp_millis(),
            method: request.method,
            url: request.url,
            headers: request.headers,
            body: request.body,
            response,
            duration,
        }
    }

    /// Returns the response status, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Returns the fields needed to repopulate the composer.
    #[must_use]
    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }

    /// Returns the send time, if the stored timestamp is representable.
    #[must_use]
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Returns a human-readable "time ago" string relative to `now`.
    #[must_use]
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let Some(sent_at) = self.sent_at() else {
            return "-".to_string();
        };
        let elapsed = now.signed_duration_since(sent_at);

        if elapsed.num_seconds() < 60 {
            "just now".to_string()
        } else if elapsed.num_minutes() < 60 {
            let mins = elapsed.num_minutes();
            format!("{mins}m ago")
        } else if elapsed.num_hours() < 24 {
            let hours = elapsed.num_hours();
            format!("{hours}h ago")
        } else if elapsed.num_days() < 7 {
            let days = elapsed.num_days();
            format!("{days}d ago")
        } else {
            sent_at.format("%Y-%m-%d").to_string()
        }
    }

    /// Returns the duration as a display string.
    #[must_use]
    pub fn duration_display(&self) -> String {
        format_duration(self.duration)
    }
}

/// Criteria for narrowing the history list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Case-insensitive substring of the URL.
    pub search: Option<String>,
    /// Status family; entries without a response always pass.
    pub status: Option<StatusClass>,
    /// Exact method.
    pub method: Option<HttpMethod>,
}

impl HistoryFilter {
    /// Returns true if `item` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, item: &RequestHistoryItem) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty())
            && !item.url.to_lowercase().contains(&search.to_lowercase())
        {
            return false;
        }

        if let (Some(class), Some(status)) = (self.status, item.status())
            && StatusClass::of(status) != class
        {
            return false;
        }

        self.method.is_none_or(|m| m == item.method)
    }
}

/// Bounded, newest-first request history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestHistory {
    entries: VecDeque<RequestHistoryItem>,
}

impl RequestHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Builds a history from stored entries (newest first), dropping any
    /// beyond the limit.
    #[must_use]
    pub fn from_entries(entries: Vec<RequestHistoryItem>) -> Self {
        let mut entries = VecDeque::from(entries);
        entries.truncate(MAX_HISTORY_ENTRIES);
        Self { entries }
    }

    /// Adds an entry at the front, evicting the oldest past the limit.
    pub fn add(&mut self, entry: RequestHistoryItem) {
        self.entries.push_front(entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    /// Returns all entries (newest first).
    #[must_use]
    pub const fn entries(&self) -> &VecDeque<RequestHistoryItem> {
        &self.entries
    }

    /// Returns an entry by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RequestHistoryItem> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns the entries matching `filter`, newest first.
    pub fn filter<'a>(
        &'a self,
        filter: &'a HistoryFilter,
    ) -> impl Iterator<Item = &'a RequestHistoryItem> + 'a {
        self.entries.iter().filter(move |e| filter.matches(e))
    }

    /// Returns the distinct methods present, in first-seen order.
    #[must_use]
    pub fn methods(&self) -> Vec<HttpMethod> {
        let mut methods = Vec::new();
        for entry in &self.entries {
            if !methods.contains(&entry.method) {
                methods.push(entry.method);
            }
        }
        methods
    }

    /// Clears all history entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
