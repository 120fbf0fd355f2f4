//! Stream decoding domain.
//!
//! - [`utf8::Utf8StreamDecoder`]: UTF-8 decoding that survives split characters
//! - [`sse::SseDecoder`]: line framing and delta extraction for SSE bodies
//! - [`event::StreamEvent`]: what the decoder hands back

pub mod event;
pub mod sse;
pub mod utf8;
