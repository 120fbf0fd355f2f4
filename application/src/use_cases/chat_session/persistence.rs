//! Background writer for conversation messages.
//!
//! Saves are queued and written one at a time in submission order, so the
//! store sees the transcript in the order it was built. Callers never await a
//! save; [`PersistQueue::flush`] waits for everything queued so far.

use crate::ports::conversation_store::ConversationStore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use travelmate_domain::{ConversationId, Message};

enum PersistCommand {
    Save(ConversationId, Message),
    Flush(oneshot::Sender<()>),
}

/// Handle to the writer task. Dropping it stops the task once the queue drains.
pub(crate) struct PersistQueue {
    tx: mpsc::UnboundedSender<PersistCommand>,
}

impl PersistQueue {
    /// Spawn the writer on the current tokio runtime.
    pub(crate) fn spawn(store: Arc<dyn ConversationStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store, rx));
        Self { tx }
    }

    pub(crate) fn save(&self, conversation: &ConversationId, message: &Message) {
        let command = PersistCommand::Save(conversation.clone(), message.clone());
        if self.tx.send(command).is_err() {
            warn!("Persistence writer stopped, dropping {} message", message.role);
        }
    }

    /// Wait until every save queued before this call has been attempted.
    pub(crate) async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(PersistCommand::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }
}

async fn run_writer(
    store: Arc<dyn ConversationStore>,
    mut rx: mpsc::UnboundedReceiver<PersistCommand>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            PersistCommand::Save(conversation, message) => {
                match store.save_message(&conversation, &message).await {
                    Ok(()) => debug!(
                        "Saved {} message to conversation {}",
                        message.role, conversation
                    ),
                    Err(e) => warn!("Error saving message: {}", e),
                }
            }
            PersistCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
