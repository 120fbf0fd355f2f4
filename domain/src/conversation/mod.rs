//! Conversation domain.
//!
//! - [`entities::Message`]: a single role-tagged message
//! - [`state::ConversationState`]: transcript plus the reducer driving a turn
//! - [`failure::TurnFailure`]: why a turn ended early

pub mod entities;
pub mod failure;
pub mod state;
