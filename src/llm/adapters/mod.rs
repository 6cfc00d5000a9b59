//! LLM Adapters
//!
//! OpenAI-compatible chat-completions client over a swappable transport.

pub mod openai;
pub mod openai_parse;
pub mod transport;
pub mod transport_fake;
pub mod transport_reqwest;
pub mod transport_types;

// Re-export common types
pub use openai::{CompletionClient, DEFAULT_BASE_URL};
pub use transport::{AsyncTransport, FakeTransport, RecordedRequest, ReqwestTransport, Transport};
pub use transport_types::{AdapterError, TransportResponse};
