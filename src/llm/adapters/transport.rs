//! HTTP Transport for the completion client
//!
//! Uses reqwest for async I/O; the fake variant serves fixtures in tests.

use async_trait::async_trait;

pub use crate::llm::adapters::transport_fake::{FakeTransport, RecordedRequest};
pub use crate::llm::adapters::transport_reqwest::ReqwestTransport;
pub use crate::llm::adapters::transport_types::{AdapterError, AsyncTransport, TransportResponse};

/// Concrete transport enum
///
/// Wraps all transport types so the client stays a concrete type.
#[derive(Debug)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl AsyncTransport for Transport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<TransportResponse, AdapterError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body).await,
            Transport::Fake(t) => t.post_json(url, headers, body).await,
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Transport::Real(ReqwestTransport::new())
    }
}
