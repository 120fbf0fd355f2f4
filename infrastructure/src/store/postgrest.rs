//! Hosted-database store speaking the PostgREST dialect.
//!
//! Writes to two tables:
//! - `chat_conversations` `{ title, user_id }`, id returned by the server
//! - `chat_messages` `{ conversation_id, role, content }`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use travelmate_application::ports::conversation_store::{ConversationStore, StoreError};
use travelmate_domain::util::truncate_str;
use travelmate_domain::{ConversationId, Message, Role};

const CONVERSATIONS: &str = "chat_conversations";
const MESSAGES: &str = "chat_messages";

#[derive(Debug, Serialize)]
struct NewConversation<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct NewMessage<'a> {
    conversation_id: &'a ConversationId,
    role: Role,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedRow {
    id: Value,
}

/// Conversation store backed by a hosted database REST API.
pub struct PostgrestConversationStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
    user_id: Option<String>,
}

impl PostgrestConversationStore {
    /// `base_url` is the project URL; tables live under `/rest/v1/`.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: None,
            user_id: None,
        }
    }

    /// Authenticate as a signed-in user instead of with the public key.
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    /// Owner recorded on new conversations.
    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn post(&self, table: &str) -> reqwest::RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::RequestFailed(format!(
            "{} {}",
            status,
            truncate_str(body.trim(), 300)
        )))
    }
}

#[async_trait]
impl ConversationStore for PostgrestConversationStore {
    async fn create_conversation(&self, title: &str) -> Result<ConversationId, StoreError> {
        let response = self
            .post(CONVERSATIONS)
            .header("Prefer", "return=representation")
            .json(&NewConversation {
                title,
                user_id: self.user_id.as_deref(),
            })
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let rows: Vec<CreatedRow> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        let id = match rows.into_iter().next().map(|row| row.id) {
            Some(Value::String(id)) => id,
            Some(Value::Number(id)) => id.to_string(),
            other => {
                return Err(StoreError::InvalidResponse(format!(
                    "expected a row with an id, got {:?}",
                    other
                )));
            }
        };
        debug!("Created {} row {}", CONVERSATIONS, id);
        Ok(ConversationId::new(id))
    }

    async fn save_message(
        &self,
        conversation: &ConversationId,
        message: &Message,
    ) -> Result<(), StoreError> {
        let response = self
            .post(MESSAGES)
            .header("Prefer", "return=minimal")
            .json(&NewMessage {
                conversation_id: conversation,
                role: message.role,
                content: &message.content,
            })
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(String, HeaderMap, Value)>>>;

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn hosted_db(captured: Captured) -> Router {
        let conversations = captured.clone();
        let messages = captured;
        Router::new()
            .route(
                "/rest/v1/chat_conversations",
                post(move |headers: HeaderMap, Json(body): Json<Value>| {
                    let conversations = conversations.clone();
                    async move {
                        conversations
                            .lock()
                            .unwrap()
                            .push(("conversations".into(), headers, body));
                        (
                            StatusCode::CREATED,
                            Json(json!([{ "id": "3f1c2a9e", "title": "Travel Planning" }])),
                        )
                    }
                }),
            )
            .route(
                "/rest/v1/chat_messages",
                post(move |headers: HeaderMap, Json(body): Json<Value>| {
                    let messages = messages.clone();
                    async move {
                        messages
                            .lock()
                            .unwrap()
                            .push(("messages".into(), headers, body));
                        StatusCode::CREATED
                    }
                }),
            )
    }

    #[tokio::test]
    async fn creates_conversation_and_saves_messages() {
        let captured: Captured = Arc::default();
        let base = spawn_server(hosted_db(captured.clone())).await;
        let store =
            PostgrestConversationStore::new(reqwest::Client::new(), format!("{base}/"), "anon")
                .with_access_token(Some("user-jwt".to_string()))
                .with_user_id(Some("user-1".to_string()));

        let id = store.create_conversation("Travel Planning").await.unwrap();
        assert_eq!(id.as_str(), "3f1c2a9e");
        store
            .save_message(&id, &Message::user("Plan Goa"))
            .await
            .unwrap();

        let captured = captured.lock().unwrap();
        let (table, headers, body) = &captured[0];
        assert_eq!(table, "conversations");
        assert_eq!(header(headers, "apikey"), Some("anon"));
        assert_eq!(header(headers, "authorization"), Some("Bearer user-jwt"));
        assert_eq!(header(headers, "prefer"), Some("return=representation"));
        assert_eq!(body, &json!({ "title": "Travel Planning", "user_id": "user-1" }));

        let (table, _, body) = &captured[1];
        assert_eq!(table, "messages");
        assert_eq!(
            body,
            &json!({ "conversation_id": "3f1c2a9e", "role": "user", "content": "Plan Goa" })
        );
    }

    #[tokio::test]
    async fn api_key_is_bearer_without_session_token() {
        let captured: Captured = Arc::default();
        let base = spawn_server(hosted_db(captured.clone())).await;
        let store = PostgrestConversationStore::new(reqwest::Client::new(), base, "anon");

        store.create_conversation("Trip").await.unwrap();

        let captured = captured.lock().unwrap();
        assert_eq!(header(&captured[0].1, "authorization"), Some("Bearer anon"));
        assert_eq!(captured[0].2, json!({ "title": "Trip" }));
    }

    #[tokio::test]
    async fn rejected_write_is_request_failed() {
        let app = Router::new().route(
            "/rest/v1/chat_messages",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "JWT expired" })),
                )
            }),
        );
        let base = spawn_server(app).await;
        let store = PostgrestConversationStore::new(reqwest::Client::new(), base, "anon");

        let err = store
            .save_message(&ConversationId::new("c1"), &Message::assistant("hi"))
            .await
            .unwrap_err();
        match err {
            StoreError::RequestFailed(message) => {
                assert!(message.contains("401"));
                assert!(message.contains("JWT expired"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_representation_is_invalid_response() {
        let app = Router::new().route(
            "/rest/v1/chat_conversations",
            post(|| async { (StatusCode::CREATED, Json(json!([]))) }),
        );
        let base = spawn_server(app).await;
        let store = PostgrestConversationStore::new(reqwest::Client::new(), base, "anon");

        let err = store.create_conversation("Trip").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidResponse(_)));
    }
}
