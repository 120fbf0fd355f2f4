//! Relay server configuration from TOML (`[relay]` section)

use serde::{Deserialize, Serialize};

/// Raw relay server configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRelayConfig {
    /// Address the relay listens on
    pub bind: String,
    /// Replaces the built-in travel system prompt
    pub system_prompt: Option<String>,
}

impl Default for FileRelayConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
            system_prompt: None,
        }
    }
}
