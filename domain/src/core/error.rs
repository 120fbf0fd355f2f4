//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("A turn is already in progress")]
    TurnInProgress,

    #[error("No turn is in progress")]
    NoActiveTurn,

    #[error("Message is empty")]
    EmptyMessage,
}
