//! Domain layer for travelmate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! A chat session is a transcript of role-tagged [`Message`]s driven by a
//! reducer ([`ConversationState::apply`]). Each turn moves through
//! `Idle → AwaitingResponse → Streaming → Idle`; failures return it to `Idle`
//! without touching what was already shown.
//!
//! ## Stream decoding
//!
//! The relay streams the upstream provider's Server-Sent-Events body through
//! unchanged. [`SseDecoder`] turns arbitrary byte chunks of that body into
//! [`StreamEvent`]s, independent of where chunk boundaries fall.

pub mod conversation;
pub mod core;
pub mod prompt;
pub mod stream;
pub mod util;

// Re-export commonly used types
pub use conversation::{
    entities::{ConversationId, Message, Role},
    failure::TurnFailure,
    state::{ChatAction, ConversationState, Transition, TurnPhase},
};
pub use core::error::DomainError;
pub use prompt::TravelPromptTemplate;
pub use stream::{event::StreamEvent, sse::SseDecoder, utf8::Utf8StreamDecoder};
