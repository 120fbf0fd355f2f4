//! Turn failure categories.
//!
//! A [`TurnFailure`] is scoped to a single turn. None of them are fatal to the
//! session: after a failure the conversation is back to idle and accepts the
//! next message.

use thiserror::Error;

/// Why a turn ended without a complete assistant reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnFailure {
    /// The relay answered 429.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The relay answered 402.
    #[error("AI credits exhausted")]
    QuotaExhausted,

    /// Any other non-success status from the relay.
    #[error("Relay returned status {status}: {message}")]
    Service { status: u16, message: String },

    /// The connection failed before or during the stream.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl TurnFailure {
    /// Map a non-success relay status to its failure category.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            429 => TurnFailure::RateLimited,
            402 => TurnFailure::QuotaExhausted,
            _ => TurnFailure::Service {
                status,
                message: message.into(),
            },
        }
    }

    /// True for failures the user can fix by waiting and retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, TurnFailure::RateLimited | TurnFailure::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(TurnFailure::from_status(429, ""), TurnFailure::RateLimited);
        assert_eq!(
            TurnFailure::from_status(402, "ignored"),
            TurnFailure::QuotaExhausted
        );
        assert_eq!(
            TurnFailure::from_status(503, "AI service error"),
            TurnFailure::Service {
                status: 503,
                message: "AI service error".to_string()
            }
        );
    }

    #[test]
    fn transient_failures() {
        assert!(TurnFailure::RateLimited.is_transient());
        assert!(TurnFailure::Transport("reset".into()).is_transient());
        assert!(!TurnFailure::QuotaExhausted.is_transient());
    }
}
