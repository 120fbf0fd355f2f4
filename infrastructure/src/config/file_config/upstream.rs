//! Upstream provider configuration from TOML (`[upstream]` section)

use serde::{Deserialize, Serialize};

/// Raw upstream provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpstreamConfig {
    /// Chat-completions endpoint
    pub url: String,
    /// Model requested for every completion
    pub model: String,
    /// Environment variable holding the provider credential.
    /// Read on every request, never stored in the config.
    pub credential_env: String,
}

impl Default for FileUpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://ai.gateway.lovable.dev/v1/chat/completions".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            credential_env: "LOVABLE_API_KEY".to_string(),
        }
    }
}
