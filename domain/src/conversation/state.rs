//! Conversation state machine.
//!
//! [`ConversationState`] holds the transcript shown to the user and the phase
//! of the current turn. It only changes through [`ConversationState::apply`],
//! a reducer over [`ChatAction`]:
//!
//! ```text
//!            TurnStarted              DeltaReceived
//!   Idle ───────────────▶ Awaiting ───────────────▶ Streaming ─┐
//!    ▲                       │                          │  ▲    │ DeltaReceived
//!    │   TurnCompleted/Failed│   TurnCompleted/Failed   │  └────┘
//!    └───────────────────────┴──────────────────────────┘
//! ```

use super::entities::{Message, Role};
use super::failure::TurnFailure;
use crate::core::error::DomainError;
use std::fmt;

/// Phase of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    /// No turn running; input is enabled.
    #[default]
    Idle,
    /// User message sent, no delta received yet.
    AwaitingResponse,
    /// At least one delta applied; the last message is the in-progress reply.
    Streaming,
}

impl TurnPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPhase::Idle => "idle",
            TurnPhase::AwaitingResponse => "awaiting_response",
            TurnPhase::Streaming => "streaming",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions accepted by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    /// The user submitted a message.
    TurnStarted(String),
    /// A content delta arrived from the stream.
    DeltaReceived(String),
    /// The stream signalled completion (sentinel or end of body).
    TurnCompleted,
    /// The turn failed before or during streaming.
    Failed(TurnFailure),
}

/// What a successful [`ConversationState::apply`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A user message was appended.
    UserAppended(Message),
    /// The in-progress assistant message was created or grew.
    AssistantUpdated,
    /// The turn ended; carries the finalized assistant reply, if any.
    TurnFinished(Option<Message>),
    /// The action had no effect (e.g. an empty delta).
    Unchanged,
}

/// Transcript plus turn phase (Aggregate)
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    phase: TurnPhase,
    last_failure: Option<TurnFailure>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a conversation with an assistant greeting already shown.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn last_failure(&self) -> Option<&TurnFailure> {
        self.last_failure.as_ref()
    }

    /// The assistant message currently being streamed, if any.
    pub fn in_progress(&self) -> Option<&Message> {
        match self.phase {
            TurnPhase::Streaming => self.messages.last(),
            _ => None,
        }
    }

    /// True when a new message may be submitted.
    pub fn accepts_input(&self) -> bool {
        self.phase == TurnPhase::Idle
    }

    /// Apply an action and return the resulting transition.
    pub fn apply(&mut self, action: ChatAction) -> Result<Transition, DomainError> {
        match action {
            ChatAction::TurnStarted(text) => {
                if self.phase != TurnPhase::Idle {
                    return Err(DomainError::TurnInProgress);
                }
                let message = Message::user(text);
                self.messages.push(message.clone());
                self.phase = TurnPhase::AwaitingResponse;
                self.last_failure = None;
                Ok(Transition::UserAppended(message))
            }
            ChatAction::DeltaReceived(delta) => {
                if delta.is_empty() {
                    return Ok(Transition::Unchanged);
                }
                match self.phase {
                    TurnPhase::Idle => Err(DomainError::NoActiveTurn),
                    TurnPhase::AwaitingResponse => {
                        self.messages.push(Message::assistant(delta));
                        self.phase = TurnPhase::Streaming;
                        Ok(Transition::AssistantUpdated)
                    }
                    TurnPhase::Streaming => {
                        match self.messages.last_mut() {
                            Some(last) if last.role == Role::Assistant => {
                                last.content.push_str(&delta);
                            }
                            _ => return Err(DomainError::NoActiveTurn),
                        }
                        Ok(Transition::AssistantUpdated)
                    }
                }
            }
            ChatAction::TurnCompleted => {
                let finished = self.finish()?;
                Ok(Transition::TurnFinished(finished))
            }
            ChatAction::Failed(failure) => {
                let finished = self.finish()?;
                self.last_failure = Some(failure);
                Ok(Transition::TurnFinished(finished))
            }
        }
    }

    fn finish(&mut self) -> Result<Option<Message>, DomainError> {
        let finished = match self.phase {
            TurnPhase::Idle => return Err(DomainError::NoActiveTurn),
            TurnPhase::AwaitingResponse => None,
            TurnPhase::Streaming => self.messages.last().cloned(),
        };
        self.phase = TurnPhase::Idle;
        Ok(finished)
    }
}
