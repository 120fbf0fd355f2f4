//! JSONL file store for chat transcripts.
//!
//! Every record is one JSON line with a `type`, a `timestamp` and the
//! `conversation_id`, appended through a buffered writer. The file is opened
//! in append mode so several sessions can share it. Writes run on tokio's
//! blocking pool.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use travelmate_application::ports::conversation_store::{ConversationStore, StoreError};
use travelmate_domain::{ConversationId, Message};

/// Conversation store writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record.
pub struct JsonlConversationStore {
    writer: Arc<Mutex<BufWriter<File>>>,
    path: PathBuf,
}

impl JsonlConversationStore {
    /// Open (or create) the file at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Arc::new(Mutex::new(BufWriter::new(file))),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(
        &self,
        record_type: &str,
        conversation: &ConversationId,
        fields: Value,
    ) -> Result<(), StoreError> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = json!({
            "type": record_type,
            "timestamp": timestamp,
            "conversation_id": conversation,
        });
        if let (Value::Object(map), Value::Object(extra)) = (&mut record, fields) {
            map.extend(extra);
        }

        let line = serde_json::to_string(&record)
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        let writer = Arc::clone(&self.writer);
        tokio::task::spawn_blocking(move || write_line(&writer, &line))
            .await
            .map_err(|e| StoreError::RequestFailed(format!("store writer task failed: {e}")))?
    }
}

fn write_line(writer: &Mutex<BufWriter<File>>, line: &str) -> Result<(), StoreError> {
    let mut writer = writer
        .lock()
        .map_err(|_| StoreError::RequestFailed("store writer poisoned".to_string()))?;
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}

#[async_trait]
impl ConversationStore for JsonlConversationStore {
    async fn create_conversation(&self, title: &str) -> Result<ConversationId, StoreError> {
        let id = ConversationId::new(uuid::Uuid::new_v4().to_string());
        self.append("conversation", &id, json!({ "title": title })).await?;
        Ok(id)
    }

    async fn save_message(
        &self,
        conversation: &ConversationId,
        message: &Message,
    ) -> Result<(), StoreError> {
        self.append(
            "message",
            conversation,
            json!({ "role": message.role, "content": message.content }),
        )
        .await
    }
}

impl Drop for JsonlConversationStore {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
