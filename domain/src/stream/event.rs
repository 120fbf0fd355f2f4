//! Events decoded from a chat-completion stream.

/// An event extracted from the relay's Server-Sent-Events body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A non-empty text fragment from `choices[0].delta.content`.
    Delta(String),
    /// The `data: [DONE]` sentinel.
    Done,
    /// A record that never became valid JSON before its event boundary.
    /// Carries the raw payload so the caller can log it.
    Malformed(String),
}

impl StreamEvent {
    /// Returns the text content if this is a Delta event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_text_returns_content() {
        let event = StreamEvent::Delta("Day 1".to_string());
        assert_eq!(event.text(), Some("Day 1"));
        assert!(!event.is_terminal());
    }

    #[test]
    fn done_is_terminal() {
        assert!(StreamEvent::Done.is_terminal());
        assert_eq!(StreamEvent::Done.text(), None);
    }

    #[test]
    fn malformed_is_neither_text_nor_terminal() {
        let event = StreamEvent::Malformed("{\"choices\":".to_string());
        assert_eq!(event.text(), None);
        assert!(!event.is_terminal());
    }
}
