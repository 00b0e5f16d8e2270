//! Canonical response record

use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Decoded response body.
///
/// The variant is fixed when the body is decoded and never re-sniffed: a
/// text body that happens to look like JSON stays `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ResponseData {
    /// Body declared as `application/json` and parsed.
    Json(serde_json::Value),
    /// Any other body, as text.
    Text(String),
}

impl ResponseData {
    /// Renders the body for display: pretty JSON or the raw text.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }

    /// Returns the JSON value if the body was decoded as JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl Default for ResponseData {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Status code family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusClass {
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirect,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
    /// Anything outside 100..600
    Other,
}

impl StatusClass {
    /// Classifies a status code.
    #[must_use]
    pub const fn of(status: u16) -> Self {
        match status {
            100..=199 => Self::Informational,
            200..=299 => Self::Success,
            300..=399 => Self::Redirect,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Informational => "informational",
            Self::Success => "success",
            Self::Redirect => "redirect",
            Self::ClientError => "client-error",
            Self::ServerError => "server-error",
            Self::Other => "other",
        })
    }
}

/// A completed HTTP exchange, whatever its status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,
    /// Response headers, lower-cased names in wire order
    pub headers: IndexMap<String, String>,
    /// Decoded body
    pub data: ResponseData,
    /// Wall-clock time from dispatch start to the last body byte
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ApiResponse {
    /// Returns the status code family.
    #[must_use]
    pub const fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status_class(), StatusClass::Success)
    }

    /// Returns a header value by lower-case name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the duration as `150ms` or `1.5s`.
    #[must_use]
    pub fn duration_display(&self) -> String {
        format_duration(self.duration)
    }

    /// Returns the duration as whole milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

/// Formats a duration as whole milliseconds below one second, else
/// seconds with one decimal.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

impl Default for ApiResponse {
    fn default() -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: IndexMap::new(),
            data: ResponseData::default(),
            duration: Duration::ZERO,
        }
    }
}

pub(crate) mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    // Older records may carry fractional milliseconds.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(millis.max(0.0) / 1000.0).map_err(serde::de::Error::custom)
    }
}
