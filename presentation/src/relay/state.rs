//! Application state shared across handlers.

use travelmate_application::RelayChatUseCase;

/// Application state shared across handlers.
///
/// Holds no mutable data: every request carries the full conversation.
#[derive(Clone)]
pub struct AppState {
    pub relay: RelayChatUseCase,
}

impl AppState {
    pub fn new(relay: RelayChatUseCase) -> Self {
        Self { relay }
    }
}
