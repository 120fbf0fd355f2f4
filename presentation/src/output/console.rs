//! Console output formatter for the chat client

use colored::Colorize;
use travelmate_domain::{Message, Role, TurnFailure};

/// Formats chat output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Short user-facing notice for a failed turn.
    pub fn failure_notice(failure: &TurnFailure) -> &'static str {
        match failure {
            TurnFailure::RateLimited => "Rate limit exceeded. Please wait a moment.",
            TurnFailure::QuotaExhausted => "AI credits exhausted. Please add funds.",
            TurnFailure::Service { .. } => "Failed to get response",
            TurnFailure::Transport(_) => "Failed to send message",
        }
    }

    /// Follow-up shown for failures that go away on their own.
    pub fn retry_hint(failure: &TurnFailure) -> Option<&'static str> {
        failure
            .is_transient()
            .then_some("Your message is kept; send again to retry.")
    }

    /// Notice plus detail, colored for the terminal.
    ///
    /// Transient failures are shown in yellow with a retry hint, the rest in red.
    pub fn format_failure(failure: &TurnFailure) -> String {
        let text = format!("✗ {}", Self::failure_notice(failure));
        let mut output = if failure.is_transient() {
            text.yellow().bold().to_string()
        } else {
            text.red().bold().to_string()
        };
        match failure {
            TurnFailure::Service { status, message } if !message.is_empty() => {
                let detail = format!("{status}: {message}");
                output.push_str(&format!("\n  {}", detail.dimmed()));
            }
            TurnFailure::Transport(detail) => {
                output.push_str(&format!("\n  {}", detail.dimmed()));
            }
            _ => {}
        }
        if let Some(hint) = Self::retry_hint(failure) {
            output.push_str(&format!("\n  {}", hint.dimmed()));
        }
        output
    }

    /// Banner shown when the REPL starts.
    pub fn format_welcome(relay_url: &str) -> String {
        let mut output = Self::header("TravelMate - Chat Mode");
        output.push_str(&format!("\n{} {}\n", "Relay:".cyan().bold(), relay_url));
        output
    }

    /// Label for a message author.
    pub fn speaker(role: Role) -> String {
        match role {
            Role::User => "You".green().bold().to_string(),
            Role::Assistant => "TravelMate".cyan().bold().to_string(),
            Role::System => "System".dimmed().to_string(),
        }
    }

    /// A single message with its author label.
    pub fn format_message(message: &Message) -> String {
        format!(
            "{}\n{}",
            Self::speaker(message.role),
            Self::indent(&message.content, "  ")
        )
    }

    /// Whole transcript, oldest first.
    pub fn format_transcript(messages: &[Message]) -> String {
        if messages.is_empty() {
            return "(no messages yet)".dimmed().to_string();
        }
        messages
            .iter()
            .map(Self::format_message)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_notices() {
        assert_eq!(
            ConsoleFormatter::failure_notice(&TurnFailure::RateLimited),
            "Rate limit exceeded. Please wait a moment."
        );
        assert_eq!(
            ConsoleFormatter::failure_notice(&TurnFailure::QuotaExhausted),
            "AI credits exhausted. Please add funds."
        );
        assert_eq!(
            ConsoleFormatter::failure_notice(&TurnFailure::from_status(500, "AI service error")),
            "Failed to get response"
        );
        assert_eq!(
            ConsoleFormatter::failure_notice(&TurnFailure::Transport("refused".into())),
            "Failed to send message"
        );
    }

    #[test]
    fn test_format_failure_includes_detail() {
        let text = ConsoleFormatter::format_failure(&TurnFailure::Transport(
            "connection refused".into(),
        ));
        assert!(text.contains("Failed to send message"));
        assert!(text.contains("connection refused"));

        let text = ConsoleFormatter::format_failure(&TurnFailure::RateLimited);
        assert!(text.contains("Rate limit exceeded"));
        assert!(text.contains("send again to retry"));

        let text = ConsoleFormatter::format_failure(&TurnFailure::QuotaExhausted);
        assert!(text.contains("AI credits exhausted"));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_retry_hint_only_for_transient_failures() {
        assert!(ConsoleFormatter::retry_hint(&TurnFailure::RateLimited).is_some());
        assert!(ConsoleFormatter::retry_hint(&TurnFailure::Transport("reset".into())).is_some());
        assert!(ConsoleFormatter::retry_hint(&TurnFailure::QuotaExhausted).is_none());
        assert!(
            ConsoleFormatter::retry_hint(&TurnFailure::from_status(500, "AI service error"))
                .is_none()
        );
    }

    #[test]
    fn test_format_transcript() {
        let text = ConsoleFormatter::format_transcript(&[
            Message::user("Plan Goa"),
            Message::assistant("Day 1: Beach\nDay 2: Forts"),
        ]);
        assert!(text.contains("Plan Goa"));
        assert!(text.contains("  Day 2: Forts"));
        assert!(ConsoleFormatter::format_transcript(&[]).contains("no messages"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
