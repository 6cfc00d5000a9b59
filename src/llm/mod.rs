//! LLM Integration: prompt building and the completion call
//!
//! - contracts → fixed system/user prompts, request builder (pure)
//! - adapters  → HTTP client, response validation
//! - types     → request / result data

pub mod adapters;
pub mod contracts;
pub mod types;

// Re-export main types
pub use types::{ChatMessage, ChatRequest, GenerationResult, ModelSettings, Role};

// Re-export contract functions
pub use contracts::{build_generation_request, system_prompt};

// Re-export adapters
pub use adapters::{AdapterError, CompletionClient, Transport};
