//! Fake transport for testing
//!
//! Uses fixture strings instead of real HTTP calls.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::adapters::transport_types::{AdapterError, AsyncTransport, TransportResponse};

/// Request captured by the fake transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Look up a header value by (case-insensitive) name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Fake transport for testing (uses fixture strings)
#[derive(Debug)]
pub struct FakeTransport {
    /// Status to return
    pub status: u16,
    /// Response body to return
    pub response_body: String,
    /// Network error message to return (if set)
    pub error_message: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    /// Create fake transport answering 200 with the given body
    pub fn new(response: &str) -> Self {
        Self::with_status(200, response)
    }

    /// Create fake transport answering with a specific status
    pub fn with_status(status: u16, response: &str) -> Self {
        Self {
            status,
            response_body: response.to_string(),
            error_message: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create fake transport that returns a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            status: 0,
            response_body: String::new(),
            error_message: Some(msg.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AsyncTransport for FakeTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<TransportResponse, AdapterError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.to_string(),
            });
        }

        if let Some(ref msg) = self.error_message {
            return Err(AdapterError::Transport(msg.clone()));
        }
        Ok(TransportResponse::new(self.status, self.response_body.clone()))
    }
}
