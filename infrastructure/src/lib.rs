//! Infrastructure layer for travelmate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod credential;
pub mod gateway;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileClientConfig, FileConfig, FileRelayConfig,
    FileStoreBackend, FileStoreConfig, FileUpstreamConfig,
};
pub use credential::EnvCredential;
pub use gateway::{GatewayUpstream, HttpRelayTransport, http_client};
pub use store::{JsonlConversationStore, PostgrestConversationStore, build_store};
