//! Line-level decoding of the chat-completion event stream.
//!
//! Every relevant line looks like `data: <json>` or `data: [DONE]`. Anything
//! else (blank separators, `: keep-alive` comments, `event:` fields) is
//! framing and is ignored. Chunks that do not have the expected
//! `choices[0].delta.content` shape are skipped too, so a single bad chunk
//! never ends the stream.

use super::stream::StreamEvent;
use serde::Deserialize;
use tracing::trace;

/// Prefix of every data line.
pub const EVENT_MARKER: &str = "data: ";

/// Payload marking the end of the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Deserialize)]
struct Chunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Classifies raw response lines into [`StreamEvent`]s.
pub struct ChunkParser;

impl ChunkParser {
    /// Classify a single line (without its trailing newline).
    pub fn parse_line(line: &str) -> StreamEvent {
        let Some(payload) = line.strip_prefix(EVENT_MARKER) else {
            return StreamEvent::Ignored;
        };
        let payload = payload.trim();

        if payload == DONE_SENTINEL {
            return StreamEvent::StreamEnd;
        }

        match Self::decode_delta(payload) {
            Some(content) if !content.is_empty() => StreamEvent::TextDelta(content),
            _ => StreamEvent::Ignored,
        }
    }

    /// Pull `choices[0].delta.content` out of a chunk payload.
    fn decode_delta(payload: &str) -> Option<String> {
        let chunk: Chunk = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => {
                trace!("Skipping undecodable chunk: {}", e);
                return None;
            }
        };

        chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
    }
}
