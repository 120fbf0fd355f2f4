//! Relay transport port
//!
//! Defines how the chat client reaches the relay endpoint.

use crate::ports::upstream::ByteStream;
use async_trait::async_trait;
use thiserror::Error;
use travelmate_domain::{Message, TurnFailure};

/// Errors that can occur before the relay started streaming
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Relay rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl From<TransportError> for TurnFailure {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Rejected { status, message } => {
                TurnFailure::from_status(status, message)
            }
            TransportError::ConnectionError(e) => TurnFailure::Transport(e),
        }
    }
}

/// Client side of the relay
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Post the full transcript and return the streamed response body.
    ///
    /// Non-success statuses are returned as [`TransportError::Rejected`]
    /// before any body is read.
    async fn open_stream(&self, messages: &[Message]) -> Result<ByteStream, TransportError>;
}
