//! Wire types shared by the HTTP adapters.

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use travelmate_application::ports::upstream::{ByteStream, StreamError};
use travelmate_domain::Message;
use travelmate_domain::util::truncate_str;

/// Body posted to the relay.
#[derive(Debug, Serialize)]
pub(crate) struct RelayRequest<'a> {
    pub messages: &'a [Message],
}

/// Error body returned by the relay.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Human-readable message from an error response body.
///
/// Prefers the relay's `{ "error": ... }` field, then the raw text.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => truncate_str(body.trim(), 500).to_string(),
    }
}

/// Expose a response body as a stream of raw chunks.
pub(crate) fn byte_stream(response: reqwest::Response) -> ByteStream {
    response
        .bytes_stream()
        .map(|chunk| chunk.map_err(|e| StreamError(e.to_string())))
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_error_field() {
        assert_eq!(
            error_message(r#"{"error":"AI service error"}"#),
            "AI service error"
        );
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(""), "");
    }

    #[test]
    fn relay_request_serializes_roles_lowercase() {
        let messages = [Message::user("hi"), Message::assistant("hello")];
        let body = serde_json::to_value(RelayRequest {
            messages: &messages,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "messages": [
                    { "role": "user", "content": "hi" },
                    { "role": "assistant", "content": "hello" }
                ]
            })
        );
    }
}
