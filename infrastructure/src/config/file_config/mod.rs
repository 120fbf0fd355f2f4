//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section has defaults, so an empty file (or none at all) is valid.

mod client;
mod relay;
mod store;
mod upstream;

pub use client::FileClientConfig;
pub use relay::FileRelayConfig;
pub use store::{FileStoreBackend, FileStoreConfig};
pub use upstream::FileUpstreamConfig;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("upstream.model cannot be empty")]
    EmptyModelName,

    #[error("upstream.credential_env cannot be empty")]
    EmptyCredentialName,

    #[error("{field} must be an http(s) URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("relay.bind is not a socket address: '{0}'")]
    InvalidBindAddress(String),

    #[error("store.{field} is required for the {backend} backend")]
    MissingStoreSetting {
        backend: &'static str,
        field: &'static str,
    },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Relay server settings
    pub relay: FileRelayConfig,
    /// Chat-completion provider settings
    pub upstream: FileUpstreamConfig,
    /// Chat client settings
    pub client: FileClientConfig,
    /// Conversation persistence settings
    pub store: FileStoreConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.upstream.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.upstream.credential_env.trim().is_empty() {
            return Err(ConfigValidationError::EmptyCredentialName);
        }

        check_url("upstream.url", &self.upstream.url)?;
        check_url("client.relay_url", &self.client.relay_url)?;

        if self.relay.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigValidationError::InvalidBindAddress(
                self.relay.bind.clone(),
            ));
        }

        if self.store.backend == FileStoreBackend::Postgrest {
            let missing = |field| ConfigValidationError::MissingStoreSetting {
                backend: "postgrest",
                field,
            };
            match &self.store.url {
                Some(url) => check_url("store.url", url)?,
                None => return Err(missing("url")),
            }
            if self.store.api_key.is_none() {
                return Err(missing("api_key"));
            }
        }

        Ok(())
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mask = |value: &Option<String>| value.as_ref().map(|_| "***".to_string());
        let mut config = self.clone();
        config.client.api_key = mask(&self.client.api_key);
        config.store.api_key = mask(&self.store.api_key);
        config.store.access_token = mask(&self.store.access_token);
        config
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}
