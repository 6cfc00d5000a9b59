//! Request and result types for the generation call

use serde::{Deserialize, Serialize};

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default completion token ceiling
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Model selection for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One instruction turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// `response_format` directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub response_format: ResponseFormat,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

/// Diagram source + HTML description returned by one successful call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Mermaid `erDiagram` source, possibly fenced
    #[serde(rename = "mermaid")]
    pub diagram_source: String,
    /// Entity-card HTML fragment
    #[serde(rename = "html")]
    pub description_html: String,
}
