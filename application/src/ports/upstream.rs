//! Upstream completion port
//!
//! Defines how the relay talks to the chat-completion provider.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use serde::Serialize;
use thiserror::Error;
use travelmate_domain::Message;

/// Error raised while reading a streamed body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct StreamError(pub String);

/// A streamed HTTP body, chunk by chunk.
pub type ByteStream = BoxStream<'static, Result<Bytes, StreamError>>;

/// Errors that can occur before the provider produced a status line
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Body sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
}

/// What the provider answered.
pub enum UpstreamReply {
    /// 2xx: the body, untouched.
    Stream(ByteStream),
    /// Non-success status with whatever body the provider sent.
    Rejected { status: u16, body: String },
}

impl std::fmt::Debug for UpstreamReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamReply::Stream(_) => f.write_str("Stream(..)"),
            UpstreamReply::Rejected { status, body } => f
                .debug_struct("Rejected")
                .field("status", status)
                .field("body", body)
                .finish(),
        }
    }
}

/// Chat-completion provider
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CompletionUpstream: Send + Sync {
    /// Send a streaming completion request authenticated with `credential`.
    async fn stream_completion(
        &self,
        request: &CompletionRequest,
        credential: &str,
    ) -> Result<UpstreamReply, UpstreamError>;
}
