//! Conversation store adapters
//!
//! - [`JsonlConversationStore`]: local append-only JSONL file
//! - [`PostgrestConversationStore`]: hosted database REST API

mod jsonl;
mod postgrest;

pub use jsonl::JsonlConversationStore;
pub use postgrest::PostgrestConversationStore;

use crate::config::{FileStoreBackend, FileStoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use travelmate_application::ports::conversation_store::{
    ConversationStore, NoConversationStore, StoreError,
};

/// Default JSONL location: `<data dir>/travelmate/conversations.jsonl`.
pub fn default_jsonl_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("travelmate")
        .join("conversations.jsonl")
}

/// Build the store selected by `[store] backend`.
pub fn build_store(
    config: &FileStoreConfig,
    client: &reqwest::Client,
) -> Result<Arc<dyn ConversationStore>, StoreError> {
    match config.backend {
        FileStoreBackend::None => Ok(Arc::new(NoConversationStore)),
        FileStoreBackend::Jsonl => {
            let path = config
                .path
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(default_jsonl_path);
            let store = JsonlConversationStore::open(&path)?;
            info!("Persisting conversations to {}", store.path().display());
            Ok(Arc::new(store))
        }
        FileStoreBackend::Postgrest => {
            let (Some(url), Some(api_key)) = (&config.url, &config.api_key) else {
                return Err(StoreError::RequestFailed(
                    "store.url and store.api_key are required for the postgrest backend"
                        .to_string(),
                ));
            };
            info!("Persisting conversations to {}", url);
            let store = PostgrestConversationStore::new(client.clone(), url, api_key)
                .with_access_token(config.access_token.clone())
                .with_user_id(config.user_id.clone());
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travelmate_domain::Message;

    #[tokio::test]
    async fn none_backend_disables_persistence() {
        let store = build_store(&FileStoreConfig::default(), &reqwest::Client::new()).unwrap();
        assert!(matches!(
            store.create_conversation("Trip").await,
            Err(StoreError::Disabled)
        ));
    }

    #[tokio::test]
    async fn jsonl_backend_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.jsonl");
        let config = FileStoreConfig {
            backend: FileStoreBackend::Jsonl,
            path: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };

        let store = build_store(&config, &reqwest::Client::new()).unwrap();
        let id = store.create_conversation("Trip").await.unwrap();
        store.save_message(&id, &Message::user("hi")).await.unwrap();
        drop(store);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn postgrest_backend_requires_url_and_key() {
        let config = FileStoreConfig {
            backend: FileStoreBackend::Postgrest,
            url: Some("https://project.supabase.co".to_string()),
            ..Default::default()
        };
        assert!(build_store(&config, &reqwest::Client::new()).is_err());
    }

    #[test]
    fn default_jsonl_path_is_namespaced() {
        let path = default_jsonl_path();
        assert!(path.ends_with("travelmate/conversations.jsonl"));
    }
}
