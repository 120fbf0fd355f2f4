//! REPL (Read-Eval-Print Loop) for interactive travel chat

use super::printer::ConsoleTurnPrinter;
use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use tracing::{debug, warn};
use travelmate_application::{ChatSession, ChatSessionError};

const HISTORY_CAPACITY: usize = 500;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for ordinary messages.
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = line.trim();
        if !cmd.starts_with('/') {
            return None;
        }
        Some(match cmd {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/history" => ReplCommand::History,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    session: ChatSession,
    printer: ConsoleTurnPrinter,
    relay_url: String,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl over a started session
    pub fn new(session: ChatSession, relay_url: impl Into<String>) -> Self {
        Self {
            session,
            printer: ConsoleTurnPrinter::new(),
            relay_url: relay_url.into(),
            history_file: None,
        }
    }

    /// Set whether to show the waiting spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.printer = self.printer.with_progress(show);
        self
    }

    /// Default history location: `<data dir>/travelmate/history.txt`.
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("travelmate").join("history.txt"))
    }

    /// Persist line-editor history to this file
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_file else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL until `/quit` or end of input
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("travelmate".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            let signal = tokio::task::block_in_place(|| editor.read_line(&prompt))?;

            match signal {
                Signal::Success(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Some(command) = ReplCommand::parse(&line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }
                    self.process_message(&line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        self.session.flush().await;
        Ok(())
    }

    /// Send one message; Ctrl-C drops the turn and keeps the partial reply.
    async fn process_message(&mut self, line: &str) {
        println!();
        let outcome = tokio::select! {
            result = self.session.send(line, &self.printer) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        };

        match outcome {
            Some(Ok(_)) => {}
            Some(Err(ChatSessionError::Failed(failure))) => {
                debug!("Turn failed: {}", failure);
            }
            Some(Err(ChatSessionError::Domain(e))) => {
                println!("{}", e.to_string().yellow());
            }
            None => {
                let partial = self.session.finish_interrupted();
                self.printer.on_interrupted(partial.as_ref());
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", ConsoleFormatter::format_welcome(&self.relay_url));
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /history  - Show the conversation so far");
        println!("  /quit     - Exit chat");
        println!();

        // Greeting seeded by the session
        for message in self.session.messages() {
            println!("{}", ConsoleFormatter::format_message(message));
            println!();
        }
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?   - Show this help");
                println!("  /history        - Show the conversation so far");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                println!("Press Ctrl-C while a reply streams to stop it.");
                println!();
                false
            }
            ReplCommand::History => {
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_transcript(self.session.messages())
                );
                println!();
                false
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slash_commands() {
        assert_eq!(ReplCommand::parse("/quit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse(" /q "), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("/?"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("/history"), Some(ReplCommand::History));
        assert_eq!(
            ReplCommand::parse("/flights"),
            Some(ReplCommand::Unknown("/flights".to_string()))
        );
    }

    #[test]
    fn ordinary_text_is_not_a_command() {
        assert_eq!(ReplCommand::parse("Plan a 3-day trip to Goa"), None);
        assert_eq!(ReplCommand::parse("Is 50/50 weather ok?"), None);
    }
}
