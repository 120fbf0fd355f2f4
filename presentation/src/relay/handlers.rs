//! HTTP request handlers for the relay.

use crate::relay::{error::ApiError, models::RelayChatRequest, state::AppState};
use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{info, warn};
use travelmate_application::RelayError;

/// Handle health check requests.
pub async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handle every other request: `OPTIONS` is an empty success, `POST` relays
/// the conversation, anything else is rejected.
pub async fn handle_relay(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }
    if method != Method::POST {
        warn!("Rejecting {} request", method);
        return Err(ApiError::UnsupportedMethod(method));
    }

    let request: RelayChatRequest = serde_json::from_slice(&body)
        .map_err(|e| RelayError::InvalidRequest(e.to_string()))?;
    info!(
        "Relaying conversation with {} message(s) to {}",
        request.messages.len(),
        state.relay.model()
    );

    let stream = state.relay.execute(request.messages).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(stream),
    )
        .into_response())
}
