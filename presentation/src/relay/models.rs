//! Request bodies accepted by the relay.

use serde::Deserialize;
use travelmate_domain::Message;

/// `POST` body: the conversation so far, oldest first.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayChatRequest {
    pub messages: Vec<Message>,
}
