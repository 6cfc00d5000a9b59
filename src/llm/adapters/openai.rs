//! OpenAI chat-completions client
//!
//! One POST per `submit`, no retry. The response envelope and the embedded
//! JSON payload are validated before a `GenerationResult` is returned.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::llm::adapters::openai_parse::{
    parse_api_error, parse_chat_completion, parse_generation_payload,
};
use crate::llm::adapters::transport::{AsyncTransport, Transport};
use crate::llm::adapters::AdapterError;
use crate::llm::types::{ChatRequest, GenerationResult};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Completion client bound to one endpoint
#[derive(Debug)]
pub struct CompletionClient {
    /// Base URL (e.g., https://api.openai.com/v1)
    base_url: String,
    /// HTTP transport
    transport: Transport,
}

impl CompletionClient {
    /// Create client using the real HTTP transport
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, Transport::default())
    }

    /// Create client with custom transport (for testing)
    pub fn with_transport(base_url: impl Into<String>, transport: Transport) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Chat completions endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Send one request and validate the answer
    pub async fn submit(
        &self,
        request: &ChatRequest,
        credential: &str,
    ) -> Result<GenerationResult, AdapterError> {
        let request_id = Uuid::new_v4();
        let url = self.endpoint();
        let body = serde_json::to_string(request)
            .map_err(|e| AdapterError::Transport(format!("failed to encode request: {}", e)))?;

        let auth_header = format!("Bearer {}", credential);
        let headers = [
            ("Authorization", auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        info!(%request_id, model = %request.model, "submitting completion request");
        let response = self
            .transport
            .post_json(&url, &headers, &body)
            .await
            .map_err(|e| {
                warn!(%request_id, error = %e, "completion transport failed");
                e
            })?;

        if !response.is_success() {
            let message = parse_api_error(&response.body);
            warn!(%request_id, status = response.status, %message, "completion rejected");
            return Err(AdapterError::Api {
                status: response.status,
                message,
            });
        }

        let message = parse_chat_completion(&response.body)?;
        let result = parse_generation_payload(&message)?;
        debug!(
            %request_id,
            diagram_len = result.diagram_source.len(),
            html_len = result.description_html.len(),
            "completion parsed"
        );
        Ok(result)
    }
}
