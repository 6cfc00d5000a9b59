//! Transport types
//!
//! Common types shared across transport implementations.

use async_trait::async_trait;

/// Completion call errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// The HTTP exchange itself could not complete
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx status; `message` comes from the provider's error body
    #[error("API Error: {message}")]
    Api { status: u16, message: String },

    /// Response is not a completion envelope (no `choices[0].message`)
    #[error("Invalid response format from API: {0}")]
    MalformedResponse(String),

    /// Message content is not the expected `{mermaid, html}` JSON object
    #[error("Invalid diagram payload: {0}")]
    MalformedPayload(String),
}

/// Raw HTTP response as seen by the adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Asynchronous HTTP transport
///
/// Abstraction over the HTTP client to enable testing with FakeTransport.
/// Non-2xx statuses are returned as responses, not errors.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// POST a JSON body and return status + body text
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<TransportResponse, AdapterError>;
}
