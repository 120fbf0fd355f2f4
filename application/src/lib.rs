//! Application layer for travelmate
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_store::{ConversationStore, NoConversationStore, StoreError},
    credential::{CredentialProvider, StaticCredential},
    relay_transport::{RelayTransport, TransportError},
    turn_observer::{NoTurnObserver, TurnObserver},
    upstream::{
        ByteStream, CompletionRequest, CompletionUpstream, StreamError, UpstreamError,
        UpstreamReply,
    },
};
pub use use_cases::chat_session::{ChatSession, ChatSessionError, SessionOptions};
pub use use_cases::relay_chat::{RelayChatUseCase, RelayError};
