//! Chat Session use case.
//!
//! Client side of the relay. A [`ChatSession`] owns the transcript, sends it to
//! the relay for every turn, decodes the streamed reply into deltas and grows
//! the assistant message as they arrive. Finalized messages are handed to a
//! [`ConversationStore`] in the background.
//!
//! One turn runs at a time: [`ChatSession::send`] takes `&mut self`. Dropping
//! the future returned by `send` cancels the turn; call
//! [`ChatSession::finish_interrupted`] afterwards to finalize what was shown.

mod persistence;

use crate::ports::conversation_store::{ConversationStore, StoreError};
use crate::ports::relay_transport::RelayTransport;
use crate::ports::turn_observer::TurnObserver;
use crate::ports::upstream::ByteStream;
use futures::StreamExt;
use persistence::PersistQueue;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use travelmate_domain::util::log_preview;
use travelmate_domain::{
    ChatAction, ConversationId, ConversationState, DomainError, Message, SseDecoder,
    StreamEvent, Transition, TravelPromptTemplate, TurnFailure,
};

/// Errors returned by [`ChatSession::send`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatSessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Turn failed: {0}")]
    Failed(#[from] TurnFailure),
}

/// How a session is opened.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Assistant message shown before the first turn. Not sent to the store.
    pub greeting: Option<String>,
    /// Title of the conversation record.
    pub title: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            greeting: Some(TravelPromptTemplate::greeting().to_string()),
            title: TravelPromptTemplate::conversation_title().to_string(),
        }
    }
}

impl SessionOptions {
    pub fn without_greeting(mut self) -> Self {
        self.greeting = None;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

pub struct ChatSession {
    transport: Arc<dyn RelayTransport>,
    state: ConversationState,
    conversation_id: Option<ConversationId>,
    persistence: PersistQueue,
}

impl ChatSession {
    /// Open a session: create the conversation record and seed the greeting.
    ///
    /// A store that cannot create the record leaves the session running
    /// without persistence.
    pub async fn start(
        transport: Arc<dyn RelayTransport>,
        store: Arc<dyn ConversationStore>,
        options: SessionOptions,
    ) -> Self {
        let conversation_id = match store.create_conversation(&options.title).await {
            Ok(id) => {
                info!("Created conversation {}", id);
                Some(id)
            }
            Err(StoreError::Disabled) => {
                debug!("Conversation persistence disabled");
                None
            }
            Err(e) => {
                warn!("Error creating conversation: {}", e);
                None
            }
        };

        let state = match options.greeting {
            Some(greeting) => ConversationState::with_greeting(greeting),
            None => ConversationState::new(),
        };

        Self {
            transport,
            state,
            conversation_id,
            persistence: PersistQueue::spawn(store),
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.state.messages()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }

    /// Run one turn.
    ///
    /// Returns the finalized assistant reply, or `None` if the stream ended
    /// without content. A [`ChatSessionError::Failed`] leaves the user message
    /// in the transcript and the session ready for the next send.
    pub async fn send(
        &mut self,
        text: &str,
        observer: &dyn TurnObserver,
    ) -> Result<Option<Message>, ChatSessionError> {
        if text.trim().is_empty() {
            return Err(DomainError::EmptyMessage.into());
        }

        if let Transition::UserAppended(user) =
            self.state.apply(ChatAction::TurnStarted(text.to_string()))?
        {
            observer.on_turn_start(&user);
            self.persist(&user);
        }

        debug!(
            "Sending {} message(s) to relay: {}",
            self.state.messages().len(),
            log_preview(text, 80)
        );

        let body = match self.transport.open_stream(self.state.messages()).await {
            Ok(body) => body,
            Err(e) => return Err(self.fail(e.into(), observer)),
        };

        if let Err(failure) = self.consume(body, observer).await {
            return Err(self.fail(failure, observer));
        }

        let reply = match self.state.apply(ChatAction::TurnCompleted)? {
            Transition::TurnFinished(reply) => reply,
            _ => None,
        };
        match &reply {
            Some(message) => {
                info!("Assistant reply complete ({} bytes)", message.content.len());
                self.persist(message);
            }
            None => warn!("Stream ended without any content"),
        }
        observer.on_turn_complete(reply.as_ref());
        Ok(reply)
    }

    /// Finalize a turn whose `send` future was dropped.
    ///
    /// The partial assistant message stays in the transcript as-is and is not
    /// persisted. Returns it, or `None` if no turn was interrupted.
    pub fn finish_interrupted(&mut self) -> Option<Message> {
        if self.state.accepts_input() {
            return None;
        }
        let phase = self.state.phase();
        match self.state.apply(ChatAction::TurnCompleted) {
            Ok(Transition::TurnFinished(partial)) => {
                info!("Turn interrupted while {}", phase);
                partial
            }
            _ => None,
        }
    }

    /// Wait for queued persistence writes.
    pub async fn flush(&self) {
        self.persistence.flush().await;
    }

    async fn consume(
        &mut self,
        mut body: ByteStream,
        observer: &dyn TurnObserver,
    ) -> Result<(), TurnFailure> {
        let mut decoder = SseDecoder::new();

        'read: while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| TurnFailure::Transport(e.to_string()))?;
            for event in decoder.push(&chunk) {
                if self.apply_event(event, observer) {
                    break 'read;
                }
            }
        }

        for event in decoder.finish() {
            self.apply_event(event, observer);
        }
        Ok(())
    }

    /// Apply one decoded event. Returns true on the end-of-stream sentinel.
    fn apply_event(&mut self, event: StreamEvent, observer: &dyn TurnObserver) -> bool {
        match event {
            StreamEvent::Delta(delta) => {
                match self.state.apply(ChatAction::DeltaReceived(delta.clone())) {
                    Ok(Transition::AssistantUpdated) => {
                        if let Some(message) = self.state.in_progress() {
                            observer.on_delta(&delta, message);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Dropping delta: {}", e),
                }
                false
            }
            StreamEvent::Done => {
                debug!("Received [DONE]");
                true
            }
            StreamEvent::Malformed(raw) => {
                warn!("Dropping malformed stream record: {}", log_preview(&raw, 200));
                false
            }
        }
    }

    fn fail(&mut self, failure: TurnFailure, observer: &dyn TurnObserver) -> ChatSessionError {
        warn!("Chat turn failed: {}", failure);
        if let Err(e) = self.state.apply(ChatAction::Failed(failure.clone())) {
            debug!("Failure after turn ended: {}", e);
        }
        observer.on_turn_failed(&failure);
        ChatSessionError::Failed(failure)
    }

    fn persist(&self, message: &Message) {
        if message.content.is_empty() {
            return;
        }
        if let Some(id) = &self.conversation_id {
            self.persistence.save(id, message);
        }
    }
}
