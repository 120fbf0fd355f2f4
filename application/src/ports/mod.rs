//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_store;
pub mod credential;
pub mod relay_transport;
pub mod turn_observer;
pub mod upstream;
