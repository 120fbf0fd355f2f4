//! Chat client configuration from TOML (`[client]` section)

use serde::{Deserialize, Serialize};

/// Raw chat client configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClientConfig {
    /// Relay endpoint the chat client posts to
    pub relay_url: String,
    /// Sent as a bearer token when set
    pub api_key: Option<String>,
    /// Seed new sessions with the assistant greeting
    pub greeting: bool,
    /// Show a spinner while waiting for the first delta
    pub show_progress: bool,
    /// Path to the REPL history file
    pub history_file: Option<String>,
}

impl Default for FileClientConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://127.0.0.1:8787/chat".to_string(),
            api_key: None,
            greeting: true,
            show_progress: true,
            history_file: None,
        }
    }
}
