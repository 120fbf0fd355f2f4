//! Conversation store configuration from TOML (`[store]` section)

use serde::{Deserialize, Serialize};

/// Where chat transcripts are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStoreBackend {
    /// No persistence
    #[default]
    None,
    /// Append records to a local JSONL file
    Jsonl,
    /// Hosted database REST API (`/rest/v1/...`)
    Postgrest,
}

/// Raw conversation store configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub backend: FileStoreBackend,
    /// Title of new conversation records
    pub title: String,
    /// JSONL file path (`jsonl` backend)
    pub path: Option<String>,
    /// Project URL (`postgrest` backend)
    pub url: Option<String>,
    /// Public API key sent as `apikey` (`postgrest` backend)
    pub api_key: Option<String>,
    /// User session token; falls back to `api_key` for the bearer header
    pub access_token: Option<String>,
    /// Owner written to `chat_conversations.user_id`
    pub user_id: Option<String>,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            backend: FileStoreBackend::None,
            title: "Travel Planning".to_string(),
            path: None,
            url: None,
            api_key: None,
            access_token: None,
            user_id: None,
        }
    }
}
