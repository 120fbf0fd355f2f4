//! Relay Chat use case.
//!
//! Forwards a conversation to the completion provider and hands the streamed
//! body back untouched. The relay is stateless: every call carries the full
//! transcript and nothing survives between calls.
//!
//! Steps:
//! 1. Resolve the provider credential (fail before any network call)
//! 2. Prepend the fixed system instruction
//! 3. Send `{ model, messages, stream: true }` upstream
//! 4. Pass a 2xx body through, or map the status to a [`RelayError`]

use crate::ports::credential::CredentialProvider;
use crate::ports::upstream::{
    ByteStream, CompletionRequest, CompletionUpstream, UpstreamError, UpstreamReply,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use travelmate_domain::util::log_preview;
use travelmate_domain::{Message, TravelPromptTemplate};

/// Errors surfaced to relay callers.
///
/// The `Display` text is what callers see in the `error` field.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0} is not configured")]
    MissingCredential(String),

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    #[error("AI credits exhausted. Please add funds to continue.")]
    QuotaExhausted,

    #[error("AI service error")]
    UpstreamStatus { status: u16 },

    #[error("{0}")]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    /// HTTP status reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::RateLimited => 429,
            RelayError::QuotaExhausted => 402,
            _ => 500,
        }
    }
}

/// Use case for relaying one chat request.
#[derive(Clone)]
pub struct RelayChatUseCase {
    upstream: Arc<dyn CompletionUpstream>,
    credentials: Arc<dyn CredentialProvider>,
    model: String,
    system_prompt: String,
}

impl RelayChatUseCase {
    pub fn new(
        upstream: Arc<dyn CompletionUpstream>,
        credentials: Arc<dyn CredentialProvider>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            upstream,
            credentials,
            model: model.into(),
            system_prompt: TravelPromptTemplate::system().to_string(),
        }
    }

    /// Replace the system instruction (operator configuration, never the caller).
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the upstream request: system instruction first, then the
    /// caller's messages in order. Caller-supplied system messages are dropped.
    pub fn build_request(&self, messages: Vec<Message>) -> CompletionRequest {
        let mut forwarded = Vec::with_capacity(messages.len() + 1);
        forwarded.push(Message::system(self.system_prompt.clone()));

        let before = messages.len();
        forwarded.extend(messages.into_iter().filter(|m| !m.is_system()));
        let dropped = before + 1 - forwarded.len();
        if dropped > 0 {
            warn!("Dropped {} caller-supplied system message(s)", dropped);
        }

        CompletionRequest {
            model: self.model.clone(),
            messages: forwarded,
            stream: true,
        }
    }

    /// Relay the conversation and return the provider's streamed body.
    pub async fn execute(&self, messages: Vec<Message>) -> Result<ByteStream, RelayError> {
        let credential = self
            .credentials
            .credential()
            .ok_or_else(|| RelayError::MissingCredential(self.credentials.name().to_string()))?;

        let request = self.build_request(messages);
        debug!(
            "Relaying {} message(s) to model {}",
            request.messages.len(),
            request.model
        );

        match self
            .upstream
            .stream_completion(&request, &credential)
            .await?
        {
            UpstreamReply::Stream(body) => {
                info!("Upstream accepted request, streaming response");
                Ok(body)
            }
            UpstreamReply::Rejected { status: 429, .. } => {
                warn!("Upstream rate limit exceeded");
                Err(RelayError::RateLimited)
            }
            UpstreamReply::Rejected { status: 402, .. } => {
                warn!("Upstream credits exhausted");
                Err(RelayError::QuotaExhausted)
            }
            UpstreamReply::Rejected { status, body } => {
                error!("AI gateway error: {} {}", status, log_preview(&body, 500));
                Err(RelayError::UpstreamStatus { status })
            }
        }
    }
}
