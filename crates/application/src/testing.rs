//! In-memory port implementations shared by the unit tests.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use courier_domain::ResolvedRequest;

use crate::ports::{
    Clock, HttpClient, HttpClientError, KeyValueStorage, StorageError, TransportResponse,
};

#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryStorage {
    pub fn failing() -> Self {
        let storage = Self::default();
        storage.set_failing(true);
        storage
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().expect("lock").get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        self.values
            .lock()
            .expect("lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockHttpClient {
    responses: Mutex<VecDeque<Result<TransportResponse, HttpClientError>>>,
    sent: Mutex<Vec<ResolvedRequest>>,
    calls: AtomicUsize,
}

impl MockHttpClient {
    pub fn returning(result: Result<TransportResponse, HttpClientError>) -> Self {
        let client = Self::default();
        client.push(result);
        client
    }

    pub fn push(&self, result: Result<TransportResponse, HttpClientError>) {
        self.responses.lock().expect("lock").push_back(result);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_sent(&self) -> Option<ResolvedRequest> {
        self.sent.lock().expect("lock").last().cloned()
    }
}

impl HttpClient for MockHttpClient {
    async fn send(&self, request: &ResolvedRequest) -> Result<TransportResponse, HttpClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().expect("lock").push(request.clone());
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(text_response(200, "OK", "")))
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn text_response(status: u16, status_text: &str, body: &str) -> TransportResponse {
    let mut response = TransportResponse {
        status,
        status_text: status_text.to_string(),
        body: body.as_bytes().to_vec(),
        ..Default::default()
    };
    response
        .headers
        .insert("content-type".to_string(), "text/plain".to_string());
    response
}

pub fn json_response(status: u16, status_text: &str, body: &str) -> TransportResponse {
    let mut response = text_response(status, status_text, body);
    response.headers.insert(
        "content-type".to_string(),
        "application/json; charset=utf-8".to_string(),
    );
    response
}
