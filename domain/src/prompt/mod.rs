//! Prompt domain
//!
//! Fixed texts for the travel assistant: the relay's system instruction, the
//! greeting shown when a session opens, and the default conversation title.

mod travel;

pub use travel::TravelPromptTemplate;
