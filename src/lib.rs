//! schemascribe: database description → Mermaid ER diagram + entity notes
//!
//! A free-text description goes to an OpenAI-compatible chat-completions
//! endpoint, which answers with a diagram source and an entity-card HTML
//! description. The diagram is rendered with the Mermaid CLI; the
//! description can be transcribed to Markdown and copied, and the diagram
//! exported as PNG.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod diagram;
pub mod export;
pub mod llm;
pub mod logging;
pub mod transcribe;
pub mod ui;

// Re-export the pure core
pub use llm::{build_generation_request, GenerationResult};
pub use transcribe::{to_markdown, EntityCard, TranscribeError};
