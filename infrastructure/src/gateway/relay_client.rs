//! Relay client adapter used by the chat session

use super::protocol::{RelayRequest, byte_stream, error_message};
use async_trait::async_trait;
use tracing::{debug, warn};
use travelmate_application::ports::relay_transport::{RelayTransport, TransportError};
use travelmate_application::ports::upstream::ByteStream;
use travelmate_domain::Message;

/// Posts the transcript to the relay endpoint over HTTP.
pub struct HttpRelayTransport {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpRelayTransport {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: None,
        }
    }

    /// Send `Authorization: Bearer <key>` with every request.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn open_stream(&self, messages: &[Message]) -> Result<ByteStream, TransportError> {
        let mut request = self.client.post(&self.url).json(&RelayRequest { messages });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            warn!("Relay returned {}: {}", status, message);
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Relay stream opened ({})", status);
        Ok(byte_stream(response))
    }
}
