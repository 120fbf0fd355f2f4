//! Presentation layer for travelmate
//!
//! This crate contains the relay HTTP surface, CLI definitions, output
//! formatters and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod output;
pub mod relay;

// Re-export commonly used types
pub use chat::{ChatRepl, ConsoleTurnPrinter};
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use relay::{ApiError, AppState, create_router, run_server};
