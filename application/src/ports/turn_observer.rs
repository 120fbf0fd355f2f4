//! Turn observer port
//!
//! Callbacks fired while a chat turn streams, so the presentation layer can
//! render the reply as it grows.

use travelmate_domain::{Message, TurnFailure};

/// Callback for progress during a chat turn
///
/// Implementations live in the presentation layer.
pub trait TurnObserver: Send + Sync {
    /// Called after the user message was appended.
    fn on_turn_start(&self, _user: &Message) {}

    /// Called for each applied delta with the updated assistant message.
    fn on_delta(&self, _delta: &str, _message: &Message) {}

    /// Called when the stream completed. `None` if no content arrived.
    fn on_turn_complete(&self, _reply: Option<&Message>) {}

    /// Called when the turn failed; input is enabled again afterwards.
    fn on_turn_failed(&self, _failure: &TurnFailure) {}
}

/// No-op observer for when rendering is not needed
pub struct NoTurnObserver;

impl TurnObserver for NoTurnObserver {}
