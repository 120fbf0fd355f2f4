//! Chat-completion provider adapter

use super::protocol::byte_stream;
use async_trait::async_trait;
use tracing::debug;
use travelmate_application::ports::upstream::{
    CompletionRequest, CompletionUpstream, UpstreamError, UpstreamReply,
};

/// OpenAI-compatible chat-completions endpoint reached over HTTP.
pub struct GatewayUpstream {
    client: reqwest::Client,
    url: String,
}

impl GatewayUpstream {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionUpstream for GatewayUpstream {
    async fn stream_completion(
        &self,
        request: &CompletionRequest,
        credential: &str,
    ) -> Result<UpstreamReply, UpstreamError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(credential)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::ConnectionError(e.to_string()))?;

        let status = response.status();
        debug!("Upstream responded {}", status);

        if status.is_success() {
            return Ok(UpstreamReply::Stream(byte_stream(response)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::RequestFailed(e.to_string()))?;
        Ok(UpstreamReply::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
