//! Interactive chat module
//!
//! A line-editor REPL over a [`travelmate_application::ChatSession`], with
//! replies printed as they stream.

mod printer;
mod repl;

pub use printer::ConsoleTurnPrinter;
pub use repl::{ChatRepl, ReplCommand};
