//! Incremental decoder for chat-completion Server-Sent-Events bodies.
//!
//! The relay passes the upstream body through untouched, so the client sees
//! OpenAI-style records:
//!
//! ```text
//! : keepalive
//! data: {"choices":[{"delta":{"content":"Day 1"}}]}
//!
//! data: [DONE]
//! ```
//!
//! [`SseDecoder::push`] accepts raw byte chunks of any size and returns the
//! events that became complete. Rules, applied per line (`\n` delimited, a
//! trailing `\r` stripped):
//!
//! - blank lines and `:` comments carry no content;
//! - lines without the `data: ` prefix are ignored;
//! - `data: [DONE]` ends the stream, nothing after it is interpreted;
//! - any other payload is parsed as JSON and yields the text at
//!   `choices[0].delta.content`.
//!
//! A payload that is not valid JSON is kept in a partial-record accumulator.
//! Following `data: ` lines of the same event are joined to it with `\n` until
//! it parses. If the event boundary (blank line) arrives first, the record is
//! reported as [`StreamEvent::Malformed`] and discarded.

use super::event::StreamEvent;
use super::utf8::Utf8StreamDecoder;
use serde_json::Value;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";
const DELTA_POINTER: &str = "/choices/0/delta/content";

/// Upper bound for a partial record before it is given up as malformed.
const MAX_PARTIAL_BYTES: usize = 1024 * 1024;

/// Stateful decoder for one streamed turn.
#[derive(Debug, Default)]
pub struct SseDecoder {
    utf8: Utf8StreamDecoder,
    buffer: String,
    partial: Option<String>,
    finished: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk of bytes and collect the events it completes.
    ///
    /// Returns nothing once [`StreamEvent::Done`] has been seen.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        let text = self.utf8.decode(chunk);
        self.buffer.push_str(&text);
        self.drain_lines(&mut events);
        events
    }

    /// Signal end of input.
    ///
    /// An unterminated final line is discarded, matching a reader that only
    /// acts on complete lines. A record still waiting for its continuation is
    /// reported as malformed.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        self.finished = true;
        let _ = self.utf8.finish();
        self.buffer.clear();
        if let Some(partial) = self.partial.take() {
            events.push(StreamEvent::Malformed(partial));
        }
        events
    }

    /// True after the `[DONE]` sentinel or [`SseDecoder::finish`].
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Bytes of text buffered while waiting for a line terminator.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len() + self.utf8.pending_len()
    }

    /// True while a record that did not parse is waiting for more data.
    pub fn has_partial_record(&self) -> bool {
        self.partial.is_some()
    }

    fn drain_lines(&mut self, events: &mut Vec<StreamEvent>) {
        let buffer = std::mem::take(&mut self.buffer);
        let mut consumed = 0;

        while let Some(offset) = buffer[consumed..].find('\n') {
            let raw = &buffer[consumed..consumed + offset];
            consumed += offset + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            if let Some(event) = self.process_line(line) {
                let terminal = event.is_terminal();
                events.push(event);
                if terminal {
                    self.finished = true;
                    return;
                }
            }
        }

        self.buffer = buffer[consumed..].to_owned();
    }

    fn process_line(&mut self, line: &str) -> Option<StreamEvent> {
        if line.trim().is_empty() {
            // Event boundary: a record still incomplete here never will be.
            return self.partial.take().map(StreamEvent::Malformed);
        }
        if line.starts_with(':') {
            return None;
        }
        let payload = line.strip_prefix(DATA_PREFIX)?.trim();

        if payload == DONE_SENTINEL {
            self.partial = None;
            return Some(StreamEvent::Done);
        }

        let candidate = match self.partial.take() {
            Some(mut pending) => {
                pending.push('\n');
                pending.push_str(payload);
                pending
            }
            None => payload.to_owned(),
        };

        match serde_json::from_str::<Value>(&candidate) {
            Ok(value) => extract_delta(&value).map(StreamEvent::Delta),
            Err(_) if candidate.len() > MAX_PARTIAL_BYTES => {
                Some(StreamEvent::Malformed(candidate))
            }
            Err(_) => {
                self.partial = Some(candidate);
                None
            }
        }
    }
}

/// Text delta of a parsed record. A missing path, a non-string value and an
/// empty string all count as "no delta".
pub fn extract_delta(value: &Value) -> Option<String> {
    value
        .pointer(DELTA_POINTER)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
