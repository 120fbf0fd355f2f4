//! Relay HTTP surface
//!
//! A stateless endpoint that forwards a conversation to the chat-completion
//! provider and streams the provider's Server-Sent-Events body back unchanged.
//! Every path except `/health` is the relay.

pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{create_router, run_server};
pub use state::AppState;
