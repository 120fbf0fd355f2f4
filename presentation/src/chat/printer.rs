//! Streaming console renderer for chat turns

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use travelmate_application::TurnObserver;
use travelmate_domain::{Message, Role, TurnFailure};

/// Prints assistant deltas to stdout as they arrive.
///
/// A spinner runs between the user's send and the first delta. The first
/// delta of each turn is preceded by the assistant label.
pub struct ConsoleTurnPrinter {
    show_progress: bool,
    spinner: Mutex<Option<ProgressBar>>,
    label_pending: AtomicBool,
}

impl ConsoleTurnPrinter {
    pub fn new() -> Self {
        Self {
            show_progress: true,
            spinner: Mutex::new(None),
            label_pending: AtomicBool::new(false),
        }
    }

    /// Set whether to show the waiting spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) -> bool {
        let Ok(mut guard) = self.spinner.lock() else {
            return false;
        };
        match guard.take() {
            Some(pb) => {
                pb.finish_and_clear();
                true
            }
            None => false,
        }
    }

    /// Called by the REPL after it dropped an in-flight turn.
    pub fn on_interrupted(&self, partial: Option<&Message>) {
        self.label_pending.store(false, Ordering::Relaxed);
        let had_spinner = self.clear_spinner();
        if partial.is_some() && !had_spinner {
            println!();
        }
        println!("{}", "(interrupted)".yellow());
    }
}

impl Default for ConsoleTurnPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnObserver for ConsoleTurnPrinter {
    fn on_turn_start(&self, _user: &Message) {
        self.label_pending.store(true, Ordering::Relaxed);
        if !self.show_progress {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("Thinking...");
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(pb);
        }
    }

    fn on_delta(&self, delta: &str, _message: &Message) {
        self.clear_spinner();
        if self.label_pending.swap(false, Ordering::Relaxed) {
            println!("{}", ConsoleFormatter::speaker(Role::Assistant));
        }
        print!("{}", delta);
        let _ = std::io::stdout().flush();
    }

    fn on_turn_complete(&self, reply: Option<&Message>) {
        self.label_pending.store(false, Ordering::Relaxed);
        self.clear_spinner();
        match reply {
            Some(_) => println!("\n"),
            None => println!("{}", "(no response)".dimmed()),
        }
    }

    fn on_turn_failed(&self, failure: &TurnFailure) {
        let streamed = !self.label_pending.swap(false, Ordering::Relaxed);
        self.clear_spinner();
        if streamed {
            println!();
        }
        eprintln!("{}", ConsoleFormatter::format_failure(failure));
    }
}
