//! Dispatcher
//!
//! Sends a resolved request once, times it, and decodes the body into an
//! [`ApiResponse`]. Any status code counts as a completed exchange.

use std::sync::Arc;
use std::time::{Duration, Instant};

use courier_domain::{ApiResponse, RequestErrorKind, RequestState, ResolvedRequest, ResponseData};
use thiserror::Error;

use crate::ports::{HttpClient, HttpClientError, TransportResponse};

/// Failures that leave no response to show.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The transport could not complete the exchange.
    #[error("{source}")]
    Network {
        /// Transport error
        #[source]
        source: HttpClientError,
        /// Time spent before the failure
        elapsed: Duration,
    },

    /// The response declared JSON but the body did not parse.
    #[error("Invalid JSON in response body: {message}")]
    BodyDecode {
        /// Parser message
        message: String,
        /// Time spent before the failure
        elapsed: Duration,
    },
}

impl DispatchError {
    /// Returns the time spent on the attempt.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        match self {
            Self::Network { elapsed, .. } | Self::BodyDecode { elapsed, .. } => *elapsed,
        }
    }

    /// Returns the display category.
    #[must_use]
    pub const fn kind(&self) -> RequestErrorKind {
        match self {
            Self::Network { source, .. } => source.to_error_kind(),
            Self::BodyDecode { .. } => RequestErrorKind::BodyDecode,
        }
    }

    /// Converts this error to a `RequestState::Error` for display.
    #[must_use]
    pub fn to_request_state(&self) -> RequestState {
        match self {
            Self::Network { source, .. } => RequestState::error(self.kind(), source.to_string()),
            Self::BodyDecode { message, .. } => RequestState::error(self.kind(), message.clone()),
        }
    }
}

/// Executes resolved requests through an [`HttpClient`].
pub struct Dispatcher<C> {
    client: Arc<C>,
}

impl<C> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> Dispatcher<C> {
    /// Creates a dispatcher over `client`.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Sends `request` and decodes the response.
    ///
    /// The duration covers the network call and body decoding.
    ///
    /// # Errors
    ///
    /// Returns `Network` when no response arrived and `BodyDecode` when a
    /// JSON response body is malformed.
    pub async fn dispatch(&self, request: &ResolvedRequest) -> Result<ApiResponse, DispatchError> {
        tracing::info!(
            method = %request.method,
            url = %request.url,
            headers = ?request.headers.keys().collect::<Vec<_>>(),
            has_body = request.body.is_some(),
            "dispatching request"
        );

        let start = Instant::now();
        let transport = match self.client.send(request).await {
            Ok(transport) => transport,
            Err(source) => {
                let elapsed = start.elapsed();
                tracing::warn!(error = %source, ?elapsed, "request failed");
                return Err(DispatchError::Network { source, elapsed });
            }
        };

        let data = decode_body(&transport).map_err(|error| {
            let elapsed = start.elapsed();
            tracing::warn!(%error, ?elapsed, "response body is not valid JSON");
            DispatchError::BodyDecode {
                message: error.to_string(),
                elapsed,
            }
        })?;
        let duration = start.elapsed();

        tracing::info!(status = transport.status, ?duration, "response received");

        Ok(ApiResponse {
            status: transport.status,
            status_text: transport.status_text,
            headers: transport.headers,
            data,
            duration,
        })
    }
}

/// Decodes the body as JSON when the content type says so, text otherwise.
fn decode_body(response: &TransportResponse) -> Result<ResponseData, serde_json::Error> {
    let is_json = response.content_type().is_some_and(|content_type| {
        content_type
            .to_ascii_lowercase()
            .contains(mime::APPLICATION_JSON.essence_str())
    });

    if is_json {
        serde_json::from_slice(&response.body).map(ResponseData::Json)
    } else {
        Ok(ResponseData::Text(
            String::from_utf8_lossy(&response.body).into_owned(),
        ))
    }
}
