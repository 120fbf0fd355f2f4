//! Port for persisting conversations.
//!
//! Writes are best-effort: the chat session never waits on them before
//! rendering and a failed write is only logged.

use async_trait::async_trait;
use thiserror::Error;
use travelmate_domain::{ConversationId, Message};

/// Errors reported by a conversation store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Persistence is disabled")]
    Disabled,

    #[error("Store request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected store response: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// External store for conversations and their messages.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Create a conversation record and return its identifier.
    async fn create_conversation(&self, title: &str) -> Result<ConversationId, StoreError>;

    /// Append a finalized message to a conversation.
    async fn save_message(
        &self,
        conversation: &ConversationId,
        message: &Message,
    ) -> Result<(), StoreError>;
}

/// No-op implementation for tests and when persistence is disabled.
pub struct NoConversationStore;

#[async_trait]
impl ConversationStore for NoConversationStore {
    async fn create_conversation(&self, _title: &str) -> Result<ConversationId, StoreError> {
        Err(StoreError::Disabled)
    }

    async fn save_message(
        &self,
        _conversation: &ConversationId,
        _message: &Message,
    ) -> Result<(), StoreError> {
        Ok(())
    }
}
