//! Real HTTP transport using reqwest

use async_trait::async_trait;
use tracing::debug;

use crate::llm::adapters::transport_types::{AdapterError, AsyncTransport, TransportResponse};

/// Real HTTP transport
///
/// No request timeout is configured: a call runs until the server answers
/// or the connection fails.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create transport around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AsyncTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<TransportResponse, AdapterError> {
        debug!(url, body_len = body.len(), "POST");

        let mut request = self.client.post(url).body(body.to_string());
        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AdapterError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AdapterError::Transport(e.to_string()))?;

        debug!(status, body_len = body.len(), "response");
        Ok(TransportResponse { status, body })
    }
}
